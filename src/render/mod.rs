pub(crate) mod arc_text;
pub(crate) mod qr;
pub(crate) mod surface;
