pub(crate) mod cyclic;
