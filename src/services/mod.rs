pub mod assist;
pub mod geoip;
pub mod recorder;
pub mod redirect;
pub mod session;

pub use assist::AssistClient;
pub use geoip::GeoIpProvider;
pub use recorder::{ClickRecorder, VisitorContext};
