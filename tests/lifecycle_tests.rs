// Integration tests for the per-document levels lifecycle
use levels::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Engine replaying a scripted sequence of results, one per call.
struct ScriptedEngine {
    script: Mutex<Vec<Analysis>>,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    fn new(script: Vec<Analysis>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().rev().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LevelEngine for ScriptedEngine {
    fn analyze(&self, _source: &str, _options: &EngineOptions) -> Analysis {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop().unwrap_or(Analysis::NoResult)
    }
}

fn levels(raw: &[(usize, usize, usize)]) -> Analysis {
    Analysis::Levels(raw.iter().copied().map(LevelSpan::from).collect())
}

fn controller(engine: Arc<ScriptedEngine>, settings: LevelsSettings) -> LevelsController {
    let engines = EngineRegistry::new();
    engines.register("js", engine);
    LevelsController::new(engines, settings, PluginVars::new("/pkgs/Levels", "Levels"))
}

fn themed_settings() -> LevelsSettings {
    LevelsSettings {
        color_scheme: Some("Packages/{{levels_plugin_name}}/Levels.tmTheme".to_string()),
        ..Default::default()
    }
}

fn js_view(id: u64) -> MemoryView {
    MemoryView::new(DocumentId(id), "function f() { return [1, 2]; }")
        .with_syntax("Packages/JavaScript/JavaScript.sublime-syntax")
        .with_style_profile("Monokai.tmTheme")
}

mod integration_tests {
    use super::*;

    #[test]
    fn enable_applies_session_style_profile() {
        // Given: a JavaScript document with its own style profile
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 30)])]);
        let controller = controller(engine, themed_settings());
        let mut view = js_view(1);

        // When: levels are enabled
        controller.enable(&mut view).unwrap();

        // Then: the configured profile is applied with variables substituted
        assert_eq!(
            view.style_profile().as_deref(),
            Some("Packages/Levels/Levels.tmTheme")
        );
    }

    #[test]
    fn enable_twice_is_enable_then_update() {
        // Given: an engine answering two calls
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 30)]), levels(&[(0, 0, 30), (1, 13, 30)])]);
        let controller = controller(Arc::clone(&engine), themed_settings());
        let mut view = js_view(1);

        // When: enable is requested twice without disable
        let first = controller.enable(&mut view).unwrap();
        let second = controller.enable(&mut view).unwrap();

        // Then: the second call is a refresh and the prior profile is the original one
        assert_eq!(
            first,
            EnableOutcome::Enabled(UpdateOutcome::Applied { level_count: 1 })
        );
        assert_eq!(
            second,
            EnableOutcome::Refreshed(UpdateOutcome::Applied { level_count: 2 })
        );
        assert_eq!(engine.calls(), 2);
        assert_eq!(controller.sessions().len(), 1);
        assert_eq!(
            controller
                .sessions()
                .get(DocumentId(1))
                .unwrap()
                .prior_style_profile(),
            Some("Monokai.tmTheme")
        );
    }

    #[test]
    fn disable_restores_style_profile_exactly() {
        // Given: an active session that went through several updates
        let engine = ScriptedEngine::new(vec![
            levels(&[(0, 0, 30)]),
            levels(&[(0, 0, 30), (1, 13, 30)]),
            Analysis::NoResult,
        ]);
        let controller = controller(engine, themed_settings());
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();
        controller.on_post_save(&mut view).unwrap();
        controller.on_post_save(&mut view).unwrap();

        // When: levels are disabled
        assert!(controller.disable(&mut view));

        // Then: the profile is exactly what it was before enable
        assert_eq!(view.style_profile().as_deref(), Some("Monokai.tmTheme"));
        assert!(!controller.is_active(DocumentId(1)));
    }

    #[test]
    fn disable_restores_unset_style_profile() {
        // Given: a document without any style profile
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)])]);
        let controller = controller(engine, themed_settings());
        let mut view = MemoryView::new(DocumentId(7), "{  }").with_syntax("JavaScript");

        // When: enabled then disabled
        controller.enable(&mut view).unwrap();
        assert!(view.style_profile().is_some());
        controller.disable(&mut view);

        // Then: the profile is unset again
        assert_eq!(view.style_profile(), None);
    }

    #[test]
    fn span_becomes_half_open_range_in_named_group() {
        // Given: an engine reporting one level-2 span
        let engine = ScriptedEngine::new(vec![levels(&[(2, 10, 15)])]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);

        // When: enabled
        controller.enable(&mut view).unwrap();

        // Then: the host holds [10, 16) under "level2", persistent and without outline
        let group = view.highlight("level2").unwrap();
        assert_eq!(group.ranges, vec![HighlightRange::new(10, 16)]);
        assert!(group.options.persistent);
        assert!(!group.options.draw_outline);
        assert_eq!(controller.level_count(DocumentId(1)), Some(3));
    }

    #[test]
    fn outline_is_drawn_when_host_cannot_disable_it() {
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)])]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1).without_no_outline_support();

        controller.enable(&mut view).unwrap();

        assert!(view.highlight("level0").unwrap().options.draw_outline);
    }

    #[test]
    fn groups_are_built_per_level() {
        // Given: spans on two levels
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 4), (0, 10, 12), (1, 1, 3)])]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);

        // When: enabled
        let outcome = controller.enable(&mut view).unwrap();

        // Then: exactly two groups and a level count of 2
        assert_eq!(
            outcome.update(),
            Some(UpdateOutcome::Applied { level_count: 2 })
        );
        assert_eq!(view.highlight_names(), vec!["level0", "level1"]);
        assert_eq!(view.highlight("level0").unwrap().ranges.len(), 2);
        assert_eq!(view.highlight("level1").unwrap().ranges.len(), 1);
    }

    #[test]
    fn no_result_skips_the_frame() {
        // Given: an active session with highlights from a successful update
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 4), (1, 1, 3)]), Analysis::NoResult]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();
        let highlights_before = view.highlights().clone();

        // When: the next update has no result
        let outcome = controller.on_post_save(&mut view).unwrap();

        // Then: level count and highlights are unchanged
        assert_eq!(outcome, Some(UpdateOutcome::Skipped));
        assert_eq!(controller.level_count(DocumentId(1)), Some(2));
        assert_eq!(view.highlights(), &highlights_before);
    }

    #[test]
    fn shrinking_update_leaves_stale_groups_until_disable() {
        // Given: a first update with three levels
        let engine = ScriptedEngine::new(vec![
            levels(&[(0, 0, 20), (1, 2, 18), (2, 4, 16)]),
            levels(&[(0, 0, 5)]),
        ]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();
        assert_eq!(controller.level_count(DocumentId(1)), Some(3));

        // When: the next update only has level 0
        controller.on_post_save(&mut view).unwrap();

        // Then: level1 and level2 remain visible (current semantics)
        assert_eq!(controller.level_count(DocumentId(1)), Some(1));
        assert_eq!(view.highlight_names(), vec!["level0", "level1", "level2"]);
        assert_eq!(
            view.highlight("level0").unwrap().ranges,
            vec![HighlightRange::new(0, 6)]
        );

        // And: disable only clears up to the latest level count
        controller.disable(&mut view);
        assert_eq!(view.highlight_names(), vec!["level1", "level2"]);
    }

    #[test]
    fn disable_clears_sentinel_and_all_levels() {
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 20), (1, 2, 18), (2, 4, 16)])]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);
        view.add_highlights("level-1", &[], HighlightOptions::for_levels(true));
        view.add_highlights("selection", &[], HighlightOptions::for_levels(true));
        controller.enable(&mut view).unwrap();

        controller.disable(&mut view);

        assert_eq!(view.highlight_names(), vec!["selection"]);
    }

    #[test]
    fn disable_without_enable_is_a_no_op() {
        // Given: a document that was never enabled
        let engine = ScriptedEngine::new(vec![]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = js_view(1);
        view.add_highlights("level0", &[HighlightRange::new(0, 1)], HighlightOptions::for_levels(true));

        // When: disable is requested
        let acted = controller.disable(&mut view);

        // Then: it is rejected and nothing changed
        assert!(!acted);
        assert!(!controller.is_command_enabled(Command::Off, DocumentId(1)));
        assert_eq!(view.style_profile().as_deref(), Some("Monokai.tmTheme"));
        assert_eq!(view.highlight_names(), vec!["level0"]);
        assert!(controller.sessions().is_empty());
    }

    #[test]
    fn disable_twice_second_is_a_no_op() {
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)])]);
        let controller = controller(engine, themed_settings());
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();

        assert!(controller.disable(&mut view));
        assert!(!controller.disable(&mut view));
        assert_eq!(view.style_profile().as_deref(), Some("Monokai.tmTheme"));
    }

    #[test]
    fn unsupported_syntax_is_silently_ignored() {
        // Given: a Python document
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)])]);
        let controller = controller(Arc::clone(&engine), themed_settings());
        let mut view = MemoryView::new(DocumentId(3), "def f(): pass")
            .with_syntax("Packages/Python/Python.sublime-syntax")
            .with_style_profile("Monokai.tmTheme");

        // When: enable is requested
        let outcome = controller.enable(&mut view).unwrap();

        // Then: no session, no engine call, no visual change
        assert_eq!(outcome, EnableOutcome::Unsupported);
        assert!(!controller.is_active(DocumentId(3)));
        assert_eq!(engine.calls(), 0);
        assert_eq!(view.style_profile().as_deref(), Some("Monokai.tmTheme"));
    }

    #[test]
    fn document_without_syntax_is_unsupported() {
        let engine = ScriptedEngine::new(vec![]);
        let controller = controller(engine, LevelsSettings::default());
        let mut view = MemoryView::new(DocumentId(3), "{}");

        assert_eq!(
            controller.enable(&mut view).unwrap(),
            EnableOutcome::Unsupported
        );
    }

    #[test]
    fn edits_update_only_when_live() {
        // Given: a non-live controller with an active session
        let engine = ScriptedEngine::new(vec![
            levels(&[(0, 0, 3)]),
            levels(&[(0, 0, 3), (1, 1, 2)]),
        ]);
        let controller = controller(Arc::clone(&engine), LevelsSettings::default());
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();

        // When: the document is modified
        let outcome = controller.handle_event(DocumentEvent::Modified, &mut view).unwrap();

        // Then: nothing runs
        assert_eq!(outcome, None);
        assert_eq!(engine.calls(), 1);

        // When: live is switched on and the document is modified again
        controller.settings().apply_settings(LevelsSettings {
            live: true,
            ..Default::default()
        });
        let outcome = controller.handle_event(DocumentEvent::Modified, &mut view).unwrap();

        // Then: the update runs
        assert_eq!(outcome, Some(UpdateOutcome::Applied { level_count: 2 }));
        assert_eq!(engine.calls(), 2);
    }

    #[test]
    fn events_on_inactive_documents_are_ignored() {
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)])]);
        let controller = controller(
            Arc::clone(&engine),
            LevelsSettings {
                live: true,
                ..Default::default()
            },
        );
        let mut view = js_view(1);

        assert_eq!(controller.handle_event(DocumentEvent::Saved, &mut view).unwrap(), None);
        assert_eq!(controller.handle_event(DocumentEvent::Modified, &mut view).unwrap(), None);
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn engine_sees_current_text_and_stored_options() {
        // Given: an engine recording its input
        let seen: Arc<Mutex<Vec<(String, EngineOptions)>>> = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        let engines = EngineRegistry::new();
        engines.register(
            "js",
            Arc::new(move |source: &str, options: &EngineOptions| {
                record
                    .lock()
                    .unwrap()
                    .push((source.to_string(), options.clone()));
                Analysis::Levels(vec![LevelSpan::new(0, 0, 0)])
            }),
        );
        let controller = LevelsController::new(
            engines,
            LevelsSettings {
                javascript_mode: "full".to_string(),
                ..Default::default()
            },
            PluginVars::new("/p", "L"),
        );
        let mut view = js_view(1);
        controller.enable(&mut view).unwrap();

        // When: the text changes and the document is saved, after the mode setting changed
        view.set_text("{ x }");
        controller.settings().apply_settings(LevelsSettings::default());
        controller.on_post_save(&mut view).unwrap();

        // Then: the new text is analysed with the options captured at enable
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].0, "{ x }");
        assert_eq!(seen[1].1, serde_json::json!({ "mode": "full" }));
    }

    #[test]
    fn distinct_documents_are_independent() {
        let engine = ScriptedEngine::new(vec![levels(&[(0, 0, 3)]), levels(&[(0, 0, 3), (1, 1, 2)])]);
        let controller = controller(engine, themed_settings());
        let mut first = js_view(1);
        let mut second = js_view(2).with_style_profile("Solarized.tmTheme");

        controller.enable(&mut first).unwrap();
        controller.enable(&mut second).unwrap();
        controller.disable(&mut first);

        assert!(!controller.is_active(DocumentId(1)));
        assert!(controller.is_active(DocumentId(2)));
        assert_eq!(controller.level_count(DocumentId(2)), Some(2));
        assert_eq!(first.style_profile().as_deref(), Some("Monokai.tmTheme"));

        controller.disable(&mut second);
        assert_eq!(second.style_profile().as_deref(), Some("Solarized.tmTheme"));
    }
}
