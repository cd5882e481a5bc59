pub mod response;

pub use response::{ActionResult, ProblemDetails};
