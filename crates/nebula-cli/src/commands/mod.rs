pub mod canonicalize;
pub mod etag;
pub mod serve;
