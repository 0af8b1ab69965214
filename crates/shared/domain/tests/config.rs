use folio_domain::capability::EffectiveConnectionType;
use folio_domain::config::{FolioConfig, LoaderConfig, PageConfig, ProbeConfig, SectionDefaults};
use folio_domain::constants::{ANIMATION_ENGINE, SECTION_HOME, SEQUENCER};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let probe = ProbeConfig::default();
    assert_eq!(probe.narrow_breakpoint_px, 768);
    assert!((probe.modest_pixel_ratio - 2.0).abs() < f64::EPSILON);
    assert_eq!(probe.fast_connections, vec![EffectiveConnectionType::Cellular4g]);
    assert!(probe.mobile_user_agents.iter().any(|t| t == "iphone"));

    let sections = SectionDefaults::default();
    assert_eq!(sections.root_margin_px, 100);
    assert_eq!(sections.priority_root_margin_px, 200);

    let page = PageConfig::default();
    assert_eq!(page.sections.len(), 6);
    assert_eq!(page.sections[0].id, SECTION_HOME);
    assert!(page.sections[0].priority);
    assert!(page.sections[1..].iter().all(|s| !s.priority && s.placeholder.is_some()));

    let loader = LoaderConfig::default();
    let sequencer = loader.modules.iter().find(|m| m.name == SEQUENCER).expect("sequencer listed");
    assert_eq!(sequencer.requires, vec![ANIMATION_ENGINE.to_owned()]);
}

#[test]
fn folio_config_deserializes_partial_documents() {
    let raw = json!({
        "probe": { "narrow_breakpoint_px": 640, "fast_connections": ["4g", "3g"] },
        "resize": { "debounce_ms": 0 },
        "page": { "sections": [ { "id": "home", "priority": true }, { "id": "contact" } ] },
        "environment": { "viewport_width": 1280, "effective_connection": "slow-2g" }
    });

    let cfg: FolioConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.probe.narrow_breakpoint_px, 640);
    assert_eq!(cfg.probe.fast_connections.len(), 2);
    assert!(
        (cfg.probe.modest_pixel_ratio - 2.0).abs() < f64::EPSILON,
        "missing keys keep defaults"
    );
    assert_eq!(cfg.resize.debounce_ms, 0);
    assert_eq!(cfg.page.sections.len(), 2);
    assert!(cfg.page.sections[1].placeholder.is_none());
    assert_eq!(cfg.environment.viewport_width, Some(1280));
    assert_eq!(cfg.environment.effective_connection, Some(EffectiveConnectionType::Slow2g));
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn deref_mut_clones_on_write() {
    let original = FolioConfig::default();
    let mut edited = original.clone();
    edited.preloader.mobile_ms = 0;

    assert_eq!(original.preloader.mobile_ms, 150);
    assert_eq!(edited.preloader.mobile_ms, 0);
}
