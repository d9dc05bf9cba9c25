//! Common imports for typical client usage.
pub use crate::{
    ClientConfig, ClientError, GenieClient, ProcessorEvent, StreamFailure, StreamHandler,
    StreamProcessor, callbacks, process_stream,
};
