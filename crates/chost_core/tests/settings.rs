use chost_core::{Settings, TagSpaceReplacer};

fn init_logging() {
    chost_logging::initialize_for_tests();
}

#[test]
fn defaults_leave_tags_off_and_use_dash() {
    init_logging();
    let settings = Settings::default();
    assert!(!settings.import_post_tags);
    assert!(!settings.import_post_comments);
    assert_eq!(settings.tag_space_replacer, TagSpaceReplacer::Dash);
}

#[test]
fn replacer_parses_both_symbols() {
    assert_eq!("-".parse::<TagSpaceReplacer>(), Ok(TagSpaceReplacer::Dash));
    assert_eq!("_".parse::<TagSpaceReplacer>(), Ok(TagSpaceReplacer::Underscore));
    assert!("+".parse::<TagSpaceReplacer>().is_err());
    assert_eq!(TagSpaceReplacer::Underscore.to_string(), "_");
}

#[test]
fn stored_settings_merge_over_defaults() {
    init_logging();
    let stored = "(importPostTags: true)";
    let settings: Settings = ron::from_str(stored).unwrap();
    assert!(settings.import_post_tags);
    assert_eq!(settings.tag_space_replacer, TagSpaceReplacer::Dash);
}

#[test]
fn replacer_serializes_as_its_symbol() {
    let settings = Settings {
        import_post_tags: true,
        import_post_comments: false,
        tag_space_replacer: TagSpaceReplacer::Underscore,
    };
    let text = ron::to_string(&settings).unwrap();
    assert!(text.contains("tagSpaceReplacer:\"_\"") || text.contains("tagSpaceReplacer: \"_\""));

    let back: Settings = ron::from_str(&text).unwrap();
    assert_eq!(back, settings);
}
