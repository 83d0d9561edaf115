pub(crate) mod request;
pub(crate) mod session;
pub(crate) mod stamp;
pub(crate) mod watermark;
