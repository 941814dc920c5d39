pub mod clock;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod keys;
pub mod model;
pub mod server;
pub mod signing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use encoding::RequestBody;
pub use engine::{SignatureEngine, SigningRequest};
pub use error::{ServerError, SignatureError};
pub use keys::{FileKeyProvider, KeyProvider, StaticKeyProvider};
pub use model::{SignatureArtifact, SignatureHeaders, SignatureRequest, SignatureType};
pub use server::{AppState, router, run};
pub use signing::{HmacSha512Signer, MessageSigner, RsaSha256Signer};
