pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_ok_has_no_error_field() {
        let h = types::Health::ok();
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[test]
    fn health_degraded_carries_reason() {
        let h = types::Health::degraded("db_unavailable");
        assert!(!h.is_ok());
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["error"], "db_unavailable");
    }
}
