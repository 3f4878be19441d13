#![cfg(feature = "serde")]
//! JSON surfaces: filter configuration files and identifier dumps.
use j1939_id::protocol::analysis::filter::FilterConfig;
use j1939_id::protocol::transport::can_id::Identifier;
use serde_json::json;

#[test]
/// The filter tool configuration lists decimal PGNs as strings.
fn filter_config_from_json() {
    let config: FilterConfig =
        serde_json::from_str(r#"{ "path": "logs/candump.log", "pgns": ["60928", "65265"] }"#)
            .unwrap();
    assert_eq!(config.path, "logs/candump.log");
    let set = config.pgn_set().unwrap();
    assert!(set.contains(60928));
    assert!(set.contains(65265));

    let config: FilterConfig =
        serde_json::from_str(r#"{ "path": "x.log", "pgns": ["abc"] }"#).unwrap();
    assert!(config.pgn_set().is_err());
}

#[test]
/// Identifiers serialize as their field map.
fn identifier_to_json() {
    let id = Identifier::from_hex("18EEFF1C").unwrap();
    assert_eq!(
        serde_json::to_value(id).unwrap(),
        json!({
            "can_id": "18EEFF1C",
            "format": "ceff",
            "priority": 6,
            "edp": 0,
            "dp": 0,
            "pf": 238,
            "ps": 255,
            "sa": 28,
            "da": 255,
            "pgn": 60928,
            "pdu_type": 1,
        })
    );

    let id = Identifier::from_hex("18FEF100").unwrap();
    let value = serde_json::to_value(id).unwrap();
    assert_eq!(value["pdu_type"], 2);
    assert_eq!(value["pgn"], 65265);
    assert_eq!(value["da"], 255);
    assert_eq!(value["ps"], 241);

    let id = Identifier::from_hex("7FF").unwrap();
    assert_eq!(
        serde_json::to_value(id).unwrap(),
        json!({ "can_id": "07FF", "format": "cbff", "priority": 7, "sa": 255 })
    );
}
