use serde_json::{Map, Value};

/// Raw, untyped intake payload as posted by the intake form.
pub type IntakePayload = Map<String, Value>;

pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_DIET_TYPE: &str = "vegetarian";

/// Intake keys that must carry a value before a full chart is generated.
/// Each entry lists the accepted aliases for one logical field.
pub const REQUIRED_INTAKE_FIELDS: &[&[&str]] =
    &[&["name"], &["dominantDosha", "dosha"], &["dietType"]];
