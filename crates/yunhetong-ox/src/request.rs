use serde::Serialize;

use crate::{
    internal::{Endpoint, HttpMethod},
    response::Envelope,
};

/// A typed request of one platform operation.
///
/// Each descriptor declares where it is sent and which envelope comes back,
/// so dispatch and decoding stay checked per operation.
pub trait ApiRequest: Serialize {
    /// Path relative to the gateway
    const PATH: &'static str;
    const METHOD: HttpMethod = HttpMethod::Post;

    /// Envelope the platform answers with
    type Response: Envelope;

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Self::PATH, Self::METHOD)
    }
}
