pub(crate) mod clock;
pub(crate) mod resolver;
pub(crate) mod virtualization;
