#[path = "prop_roundtrip.rs"]
mod roundtrip_props;
