pub(crate) mod http;
pub(crate) mod ip_source;
pub(crate) mod static_ip;
