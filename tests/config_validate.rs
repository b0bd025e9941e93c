use volant::{AnimatorConfig, LoopMode};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/flight_config.json");
    let cfg: AnimatorConfig = serde_json::from_str(s).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.loop_mode, LoopMode::OnDemand);
    assert_eq!(cfg.flap.interval_ms, 180.0);
}

#[test]
fn empty_object_is_the_default_tuning() {
    let cfg: AnimatorConfig = serde_json::from_str("{}").unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.loop_mode, LoopMode::Continuous);
    assert_eq!(cfg.flight.traverse_cycles, 3.0);
}
