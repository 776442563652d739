pub mod compile_pipeline;
pub mod converter;
pub mod document_store;
pub mod session;

pub use compile_pipeline::{CompileOutput, CompilePipeline};
pub use converter::{Converter, PictConv};
pub use session::Session;
