pub mod api;
pub mod error;
pub mod overlay;
pub mod preview;
pub mod settings;
pub mod triage;
pub mod types;

pub use api::PredictClient;
pub use error::{Error, Result};
pub use overlay::OverlayBox;
pub use preview::Preview;
pub use settings::Settings;
pub use triage::{TriageController, Verdict};
pub use types::{AnalysisResult, Detection, DisplayGeometry, Summary};
