use regex::Regex;
use std::sync::OnceLock;

static RESOURCE_ID: OnceLock<Regex> = OnceLock::new();

/// Exactly 24 hex digits, either case: the textual form of an ObjectId.
pub fn is_resource_id(id: &str) -> bool {
    RESOURCE_ID
        .get_or_init(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("resource id pattern compiles"))
        .is_match(id)
}
