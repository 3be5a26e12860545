pub mod blog;
pub mod click_event;
pub mod email_capture;
pub mod landing_content;
pub mod link_click;
pub mod prelanding;
pub mod related_search;
pub mod session;
pub mod web_result;

pub use blog::Entity as BlogEntity;
pub use click_event::Entity as ClickEventEntity;
pub use email_capture::Entity as EmailCaptureEntity;
pub use landing_content::Entity as LandingContentEntity;
pub use link_click::Entity as LinkClickEntity;
pub use prelanding::Entity as PrelandingEntity;
pub use related_search::Entity as RelatedSearchEntity;
pub use session::Entity as SessionEntity;
pub use web_result::Entity as WebResultEntity;
