//! End-to-end stage behaviour on the virtual clock.

mod fixtures;

use fixtures::{
    VIEWPORT, count, gallery, hero, home_page, ids, intro_config, quiet_config, region,
};
use vitrine_core::form::FormFields;
use vitrine_core::media::StaticLoader;
use vitrine_stage::contact::FormPhase;
use vitrine_stage::index::RotationMode;
use vitrine_stage::intro::IntroPhase;
use vitrine_stage::pinning::{PinCrossing, PinPhase};
use vitrine_stage::transition::{TextRevealMode, TransitionPhase};
use vitrine_stage::{InputDisposition, Measure, Notice, Simulation, StageCommand};
use vitrine_types::{ElementBounds, ElementId, MediaRef, RawInput, Viewport};

fn quiet_sim() -> Simulation {
    let mut sim = Simulation::new(quiet_config(), home_page());
    sim.boot(None);
    sim.take_notices();
    sim
}

fn gallery_offset(sim: &Simulation, progress: f32) -> f64 {
    sim.state()
        .region(&ElementId::new("gallery"))
        .and_then(|r| r.boundary)
        .map(|b| b.offset_for(progress))
        .unwrap()
}

fn crossings(notices: &[Notice]) -> Vec<PinCrossing> {
    notices
        .iter()
        .filter_map(|n| match n {
            Notice::PinCrossed { crossing, .. } => Some(*crossing),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Pinning and index
// ============================================================================

#[test]
fn test_gallery_active_index_at_83_percent() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));

    let offset = gallery_offset(&sim, 0.83);
    sim.input(RawInput::Scroll { offset });

    let snapshot = sim.snapshot();
    let gallery = region(&snapshot, "gallery");
    assert_eq!(gallery.phase, PinPhase::Pinned);
    assert_eq!(gallery.active_index, Some(4));
    assert_eq!(gallery.neighbors.previous, Some(3));
    assert_eq!(gallery.neighbors.next, Some(5));

    let notices = sim.take_notices();
    assert!(notices.contains(&Notice::ActiveIndexChanged {
        region: ElementId::new("gallery"),
        index: Some(4),
    }));
}

#[test]
fn test_crossings_fire_once_per_edge() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));
    let start = gallery_offset(&sim, 0.0);
    let end = gallery_offset(&sim, 1.0);

    sim.input(RawInput::Scroll { offset: start + 10.0 });
    sim.input(RawInput::Scroll { offset: start + 200.0 });
    sim.input(RawInput::Scroll { offset: start + 400.0 });
    assert_eq!(crossings(&sim.take_notices()), vec![PinCrossing::Enter]);

    sim.input(RawInput::Scroll { offset: end + 50.0 });
    sim.input(RawInput::Scroll { offset: end + 100.0 });
    assert_eq!(crossings(&sim.take_notices()), vec![PinCrossing::LeaveForward]);

    sim.input(RawInput::Scroll { offset: end - 50.0 });
    assert_eq!(crossings(&sim.take_notices()), vec![PinCrossing::EnterBack]);

    sim.input(RawInput::Scroll { offset: 0.0 });
    assert_eq!(crossings(&sim.take_notices()), vec![PinCrossing::LeaveBackward]);
}

#[test]
fn test_jump_across_region_fires_both_edges() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));
    let end = gallery_offset(&sim, 1.0);

    sim.input(RawInput::Scroll { offset: end + 200.0 });

    assert_eq!(
        crossings(&sim.take_notices()),
        vec![PinCrossing::Enter, PinCrossing::LeaveForward]
    );
    assert_eq!(region(&sim.snapshot(), "gallery").progress, 1.0);
}

#[test]
fn test_resize_while_pinned_keeps_progress() {
    let mut sim = quiet_sim();
    sim.mount(gallery(4));
    let offset = gallery_offset(&sim, 0.5);
    sim.input(RawInput::Scroll { offset });
    sim.take_notices();

    sim.page_mut().set_element(
        &ElementId::new("gallery"),
        ElementBounds::new(600.0, 600.0, 800.0),
    );
    sim.input(RawInput::Resize {
        viewport: Viewport::new(800.0, 600.0),
    });

    let snapshot = sim.snapshot();
    let gallery = region(&snapshot, "gallery");
    assert_eq!(gallery.phase, PinPhase::Pinned);
    assert!((gallery.progress - 0.5).abs() < 1e-4);
    // 600 + 0.5 * (4 * 0.6 * 600)
    assert!((sim.page().scroll_offset() - 1320.0).abs() < 1e-6);
    assert!(crossings(&sim.take_notices()).is_empty());
}

#[test]
fn test_resize_moving_region_under_page_fires_enter() {
    let mut sim = quiet_sim();
    let gallery_id = ElementId::new("gallery");
    sim.page_mut().set_element(&gallery_id, ElementBounds::new(3000.0, 800.0, 1280.0));
    sim.mount(gallery(4));
    sim.input(RawInput::Scroll { offset: 1000.0 });
    assert_eq!(region(&sim.snapshot(), "gallery").phase, PinPhase::Before);
    sim.take_notices();

    // The region slides up under the page: boundary 0..1920 at offset 1000.
    sim.page_mut().set_element(&gallery_id, ElementBounds::new(0.0, 800.0, 1280.0));
    sim.input(RawInput::Resize { viewport: VIEWPORT });
    sim.input(RawInput::Scroll { offset: 1010.0 });
    sim.advance(2000);

    let snapshot = sim.snapshot();
    let gallery = region(&snapshot, "gallery");
    assert_eq!(gallery.phase, PinPhase::Pinned);
    assert_eq!(gallery.active_index, Some(2));
    let stage = snapshot
        .crossfades
        .iter()
        .find(|c| c.element.as_str() == "gallery-stage")
        .unwrap();
    assert_eq!(stage.current, Some(MediaRef::new("/work/2.jpg")));

    let notices = sim.take_notices();
    assert_eq!(crossings(&notices), vec![PinCrossing::Enter]);
    assert!(notices.contains(&Notice::ActiveIndexChanged {
        region: gallery_id,
        index: Some(2),
    }));
}

#[test]
fn test_scrolling_back_restores_active_index() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));
    let offsets: Vec<f64> = [0.05, 0.2, 0.35, 0.5, 0.65, 0.8, 0.95]
        .into_iter()
        .map(|p| gallery_offset(&sim, p))
        .collect();

    let mut forward = Vec::new();
    for offset in &offsets {
        sim.input(RawInput::Scroll { offset: *offset });
        forward.push(region(&sim.snapshot(), "gallery").active_index);
    }
    assert_eq!(forward.first(), Some(&Some(0)));
    assert_eq!(forward.last(), Some(&Some(5)));

    let end = gallery_offset(&sim, 1.0);
    sim.input(RawInput::Scroll { offset: end + 100.0 });
    for (offset, expected) in offsets.iter().zip(&forward).rev() {
        sim.input(RawInput::Scroll { offset: *offset });
        assert_eq!(
            region(&sim.snapshot(), "gallery").active_index,
            *expected,
            "offset {offset}"
        );
    }
}

#[test]
fn test_resize_recomputes_gap_and_geometry() {
    let mut sim = quiet_sim();
    sim.mount(
        gallery(4)
            .with_rotation(RotationMode::PerSequence)
            .with_track_width(3200.0),
    );
    let offset = gallery_offset(&sim, 0.5);
    sim.input(RawInput::Scroll { offset });

    let snapshot = sim.snapshot();
    let before = region(&snapshot, "gallery");
    // 24 + (1280 - 480) / 960 * 72
    assert!((before.gap_px - 84.0).abs() < 1e-6);
    assert!((before.rotation_deg.unwrap() - 180.0).abs() < 1e-3);
    assert!((before.track_offset_px.unwrap() + 960.0).abs() < 1e-3);

    sim.page_mut().set_element(
        &ElementId::new("gallery"),
        ElementBounds::new(600.0, 600.0, 800.0),
    );
    sim.input(RawInput::Resize {
        viewport: Viewport::new(800.0, 600.0),
    });

    let snapshot = sim.snapshot();
    let after = region(&snapshot, "gallery");
    // 24 + (800 - 480) / 960 * 72
    assert!((after.gap_px - 48.0).abs() < 1e-6);
    assert!((after.rotation_deg.unwrap() - 180.0).abs() < 1e-3);
    assert!((after.track_offset_px.unwrap() + 1200.0).abs() < 1e-3);
}

// ============================================================================
// Input intercept
// ============================================================================

#[test]
fn test_hero_captures_then_releases_at_threshold() {
    let mut sim = quiet_sim();
    sim.mount(hero());
    assert!(sim.page().is_locked());
    let notices = sim.take_notices();
    assert!(notices.contains(&Notice::InterceptCaptured {
        region: ElementId::new("hero"),
    }));

    // 100 * 0.005
    assert_eq!(sim.input(RawInput::Wheel { delta_y: 100.0 }), InputDisposition::Consumed);
    assert!((region(&sim.snapshot(), "hero").progress - 0.5).abs() < 1e-6);
    assert_eq!(sim.page().scroll_offset(), 0.0);

    // Native scrolling cannot move a locked page.
    sim.input(RawInput::Scroll { offset: 300.0 });
    assert_eq!(sim.page().scroll_offset(), 0.0);

    assert_eq!(sim.input(RawInput::Wheel { delta_y: 100.0 }), InputDisposition::Consumed);
    assert!(!sim.page().is_locked());
    let notices = sim.take_notices();
    assert!(notices.contains(&Notice::InterceptReleased {
        region: ElementId::new("hero"),
    }));
    assert!(notices.contains(&Notice::ContentVisibility {
        region: ElementId::new("hero"),
        visible: true,
    }));
    assert_eq!(crossings(&notices), vec![PinCrossing::LeaveForward]);

    assert_eq!(sim.input(RawInput::Wheel { delta_y: 200.0 }), InputDisposition::PassThrough);
    assert_eq!(sim.page().scroll_offset(), 200.0);
}

#[test]
fn test_reverse_input_at_top_recaptures() {
    let mut sim = quiet_sim();
    sim.mount(hero());
    sim.input(RawInput::Wheel { delta_y: 200.0 });
    sim.input(RawInput::Wheel { delta_y: 150.0 });
    assert_eq!(sim.page().scroll_offset(), 150.0);

    // Away from the top a reverse scroll is plain page scrolling.
    assert_eq!(sim.input(RawInput::Wheel { delta_y: -100.0 }), InputDisposition::PassThrough);
    assert_eq!(sim.page().scroll_offset(), 50.0);
    assert_eq!(sim.input(RawInput::Wheel { delta_y: -50.0 }), InputDisposition::PassThrough);
    assert_eq!(sim.page().scroll_offset(), 0.0);
    sim.take_notices();

    assert_eq!(sim.input(RawInput::Wheel { delta_y: -40.0 }), InputDisposition::Consumed);
    assert!(sim.page().is_locked());
    let notices = sim.take_notices();
    assert!(notices.contains(&Notice::InterceptCaptured {
        region: ElementId::new("hero"),
    }));
    assert_eq!(crossings(&notices), vec![PinCrossing::EnterBack]);

    // Further reverse input closes the hero and hides its content.
    assert_eq!(sim.input(RawInput::Wheel { delta_y: -100.0 }), InputDisposition::Consumed);
    assert!((region(&sim.snapshot(), "hero").progress - 0.5).abs() < 1e-6);
    assert!(sim.take_notices().contains(&Notice::ContentVisibility {
        region: ElementId::new("hero"),
        visible: false,
    }));
}

#[test]
fn test_touch_drag_opens_hero() {
    let mut sim = quiet_sim();
    sim.mount(hero());

    sim.input(RawInput::TouchStart { y: 600.0 });
    // 40px up at 0.015 per pixel
    assert_eq!(sim.input(RawInput::TouchMove { y: 560.0 }), InputDisposition::Consumed);
    assert!((region(&sim.snapshot(), "hero").progress - 0.6).abs() < 1e-5);

    sim.input(RawInput::TouchMove { y: 520.0 });
    sim.input(RawInput::TouchEnd);
    assert!(!sim.page().is_locked());
    assert_eq!(region(&sim.snapshot(), "hero").show_content, Some(true));
}

#[test]
fn test_navigation_releases_capture() {
    let mut sim = quiet_sim();
    sim.sections(&ids(&["hero", "about", "contact"]));
    sim.mount(hero());
    assert!(sim.page().is_locked());

    sim.command(StageCommand::NavigateTo {
        anchor: ElementId::new("about"),
    });

    assert!(!sim.page().is_locked());
    assert_eq!(sim.page().scroll_offset(), 4400.0);
    assert_eq!(sim.snapshot().active_section, Some(ElementId::new("about")));
}

// ============================================================================
// Intro and deep links
// ============================================================================

#[test]
fn test_intro_queues_mounts_and_swallows_input() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(None);
    assert_eq!(sim.state().intro.phase(), IntroPhase::Playing);
    assert!(sim.page().is_locked());

    sim.mount(gallery(6));
    assert!(sim.state().regions.is_empty());
    assert_eq!(sim.input(RawInput::Wheel { delta_y: 120.0 }), InputDisposition::Consumed);
    sim.command(StageCommand::NavigateTo {
        anchor: ElementId::new("contact"),
    });
    assert_eq!(sim.page().scroll_offset(), 0.0);

    sim.advance(2600);

    assert_eq!(sim.state().intro.phase(), IntroPhase::Done);
    assert_eq!(sim.state().regions.len(), 1);
    assert!(!sim.page().is_locked());
    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| *n == Notice::IntroFinished { skipped: false }),
        1
    );
}

#[test]
fn test_intro_finish_signal_opens_gate_early() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(None);
    sim.mount(gallery(6));
    sim.advance(100);

    sim.command(StageCommand::IntroFinished);

    assert_eq!(sim.state().intro.phase(), IntroPhase::Done);
    assert_eq!(sim.state().regions.len(), 1);
    sim.advance(3000);
    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::IntroFinished { .. })),
        1
    );
}

#[test]
fn test_deep_link_skips_intro_and_lands_below_nav() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(Some("#contact"));
    sim.sections(&ids(&["hero", "gallery", "about", "contact"]));

    assert_eq!(sim.state().intro.phase(), IntroPhase::Done);
    assert!(!sim.state().intro.has_played());

    sim.mount(hero());
    sim.mount(gallery(6));
    assert!(!sim.page().is_locked());
    assert_eq!(region(&sim.snapshot(), "hero").phase, PinPhase::After);

    sim.advance(299);
    assert_eq!(sim.page().scroll_offset(), 0.0);
    sim.advance(1);

    assert_eq!(sim.page().scroll_offset(), 5200.0);
    assert_eq!(sim.snapshot().active_section, Some(ElementId::new("contact")));
    assert_eq!(sim.pending_timers(), 0);
    let notices = sim.take_notices();
    assert!(notices.contains(&Notice::IntroFinished { skipped: true }));
}

#[test]
fn test_deep_link_resolves_on_regions_ready() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(Some("#about"));
    sim.mount(gallery(6));

    sim.command(StageCommand::RegionsReady);

    assert_eq!(sim.page().scroll_offset(), 4400.0);
    assert_eq!(sim.pending_timers(), 0);

    // The settle deadline passing later changes nothing.
    sim.page_mut().set_offset(1000.0);
    sim.advance(500);
    assert_eq!(sim.page().scroll_offset(), 1000.0);
}

#[test]
fn test_deep_link_survives_anchor_unmount() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(Some("#contact"));
    sim.unmount("contact");
    assert_eq!(sim.pending_timers(), 1);

    sim.advance(300);

    assert_eq!(sim.page().scroll_offset(), 5200.0);
    assert_eq!(sim.pending_timers(), 0);
}

#[test]
fn test_unknown_deep_link_leaves_page_at_top() {
    let mut sim = Simulation::new(intro_config(), home_page());
    sim.boot(Some("#nowhere"));
    sim.advance(400);

    assert_eq!(sim.page().scroll_offset(), 0.0);
    assert_eq!(sim.state().intro.phase(), IntroPhase::Done);
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_scramble_reveals_one_character_per_interval() {
    let mut sim = quiet_sim();
    sim.command(StageCommand::RevealText {
        element: ElementId::new("title"),
        text: "ART".to_string(),
        mode: TextRevealMode::Scramble,
    });

    sim.advance(100);
    let snapshot = sim.snapshot();
    let display: Vec<char> = snapshot.texts[0].display.chars().collect();
    assert_eq!(display.len(), 3);
    assert_eq!(&display[..2], &['A', 'R']);
    assert!(sim.state().alphabet.contains(&display[2]));
    assert_eq!(snapshot.texts[0].phase, TransitionPhase::Running);

    sim.advance(50);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.texts[0].display, "ART");
    assert_eq!(snapshot.texts[0].phase, TransitionPhase::Complete);
    assert_eq!(sim.pending_timers(), 0);

    sim.advance(500);
    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::TextRevealCompleted { .. })),
        1
    );
}

#[test]
fn test_typewriter_starts_empty() {
    let mut sim = quiet_sim();
    sim.command(StageCommand::RevealText {
        element: ElementId::new("title"),
        text: "Hi there".to_string(),
        mode: TextRevealMode::Typewriter,
    });
    assert_eq!(sim.snapshot().texts[0].display, "");

    sim.advance(150);
    assert_eq!(sim.snapshot().texts[0].display, "Hi ");
}

#[test]
fn test_same_text_request_is_noop_and_new_text_restarts() {
    let mut sim = quiet_sim();
    let reveal = |text: &str| StageCommand::RevealText {
        element: ElementId::new("title"),
        text: text.to_string(),
        mode: TextRevealMode::Scramble,
    };

    sim.command(reveal("ART"));
    sim.advance(200);
    sim.command(reveal("ART"));
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.snapshot().texts[0].display, "ART");

    sim.command(reveal("CRAFT"));
    assert_eq!(sim.pending_timers(), 1);
    sim.advance(250);
    assert_eq!(sim.snapshot().texts[0].display, "CRAFT");
    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::TextRevealCompleted { .. })),
        2
    );
}

#[test]
fn test_second_crossfade_while_running_is_ignored() {
    let mut sim = quiet_sim();
    let stage = ElementId::new("stage");
    sim.command(StageCommand::SetMedia {
        element: stage.clone(),
        initial: Some(MediaRef::new("/a.jpg")),
    });
    sim.command(StageCommand::Crossfade {
        element: stage.clone(),
        target: MediaRef::new("/b.jpg"),
    });
    // Latency is zero: the load lands on the next clock step.
    sim.advance(0);
    assert!(sim.media_is_ready(&MediaRef::new("/b.jpg")));

    sim.command(StageCommand::Crossfade {
        element: stage.clone(),
        target: MediaRef::new("/c.jpg"),
    });
    sim.advance(500);
    let mid = sim.snapshot();
    assert!(mid.crossfades[0].blend > 0.0 && mid.crossfades[0].blend < 1.0);

    sim.advance(700);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.crossfades[0].current, Some(MediaRef::new("/b.jpg")));
    assert_eq!(snapshot.crossfades[0].next, None);

    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::CrossfadeStarted { .. })),
        1
    );
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::CrossfadeCompleted { .. })),
        1
    );
}

#[test]
fn test_failed_media_skips_crossfade() {
    let mut sim = Simulation::new(quiet_config(), home_page())
        .with_media(StaticLoader::default().failing(MediaRef::new("/broken.jpg")));
    sim.boot(None);
    let stage = ElementId::new("stage");
    sim.command(StageCommand::SetMedia {
        element: stage.clone(),
        initial: Some(MediaRef::new("/a.jpg")),
    });
    sim.command(StageCommand::Crossfade {
        element: stage,
        target: MediaRef::new("/broken.jpg"),
    });
    sim.advance(1500);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.crossfades[0].current, Some(MediaRef::new("/a.jpg")));
    let notices = sim.take_notices();
    assert!(notices.iter().any(|n| matches!(n, Notice::CrossfadeSkipped { .. })));
    assert!(!notices.iter().any(|n| matches!(n, Notice::CrossfadeStarted { .. })));
}

#[test]
fn test_gallery_index_change_crossfades_stage() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));
    let offset = gallery_offset(&sim, 0.5);
    sim.input(RawInput::Scroll { offset });
    sim.advance(1100);

    let snapshot = sim.snapshot();
    let stage = snapshot
        .crossfades
        .iter()
        .find(|c| c.element.as_str() == "gallery-stage")
        .unwrap();
    assert_eq!(stage.current, Some(MediaRef::new("/work/3.jpg")));
}

#[test]
fn test_fast_scroll_during_crossfade_catches_up() {
    let mut sim = quiet_sim();
    sim.mount(gallery(6));
    let first = gallery_offset(&sim, 0.2);
    sim.input(RawInput::Scroll { offset: first });
    sim.advance(50);

    // Index 3 arrives while the blend to work 1 is still running.
    let second = gallery_offset(&sim, 0.55);
    sim.input(RawInput::Scroll { offset: second });
    sim.advance(3000);

    let snapshot = sim.snapshot();
    assert_eq!(region(&snapshot, "gallery").active_index, Some(3));
    let stage = snapshot
        .crossfades
        .iter()
        .find(|c| c.element.as_str() == "gallery-stage")
        .unwrap();
    assert_eq!(stage.current, Some(MediaRef::new("/work/3.jpg")));
    assert_eq!(stage.next, None);

    let notices = sim.take_notices();
    assert_eq!(
        count(&notices, |n| matches!(n, Notice::CrossfadeCompleted { .. })),
        2
    );
}

#[test]
fn test_entrance_reveal_fires_once() {
    let mut sim = quiet_sim();
    let about = ElementId::new("about");
    sim.command(StageCommand::ObserveReveal {
        element: about.clone(),
    });
    assert_eq!(sim.page().observer_count(), 1);

    sim.command(StageCommand::Visibility {
        element: about.clone(),
        ratio: 0.05,
    });
    assert!(sim.take_notices().is_empty());

    sim.command(StageCommand::Visibility {
        element: about.clone(),
        ratio: 0.4,
    });
    assert_eq!(sim.page().observer_count(), 0);
    sim.advance(900);
    sim.command(StageCommand::Visibility {
        element: about,
        ratio: 1.0,
    });

    let notices = sim.take_notices();
    assert_eq!(count(&notices, |n| matches!(n, Notice::RevealStarted { .. })), 1);
    assert_eq!(count(&notices, |n| matches!(n, Notice::RevealCompleted { .. })), 1);
    assert_eq!(sim.snapshot().reveals[0].frame.opacity, 1.0);
}

// ============================================================================
// Teardown and contact form
// ============================================================================

#[test]
fn test_unmount_releases_listeners_and_timers() {
    let mut sim = quiet_sim();
    sim.mount(hero());
    sim.mount(gallery(6));
    sim.command(StageCommand::ObserveReveal {
        element: ElementId::new("about"),
    });
    sim.command(StageCommand::RevealText {
        element: ElementId::new("title"),
        text: "Selected works".to_string(),
        mode: TextRevealMode::Scramble,
    });
    assert!(sim.page().listener_count() > 0);
    assert_eq!(sim.pending_timers(), 1);

    for id in ["hero", "gallery", "about", "title"] {
        sim.unmount(id);
    }

    assert_eq!(sim.page().listener_count(), 0);
    assert_eq!(sim.page().observer_count(), 0);
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.state().listeners.count(), 0);
    assert!(sim.state().timers.is_empty());
    assert!(sim.state().regions.is_empty());
    assert!(!sim.page().is_locked());

    // Nothing fires for the torn-down reveal.
    sim.advance(2000);
    assert!(sim.snapshot().texts.is_empty());
}

#[test]
fn test_contact_submit_settles_once() {
    let mut sim = quiet_sim();
    let fields = FormFields {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: String::new(),
        message: "Commission enquiry".to_string(),
    };
    sim.command(StageCommand::SubmitForm {
        fields: fields.clone(),
    });
    sim.command(StageCommand::SubmitForm { fields });
    assert_eq!(sim.snapshot().form, FormPhase::Pending);

    sim.advance(1500);

    assert_eq!(sim.snapshot().form, FormPhase::Succeeded);
    let notices = sim.take_notices();
    assert_eq!(notices, vec![Notice::FormSettled { ok: true }]);
}

#[test]
fn test_contact_failure_reports_message() {
    let mut sim = Simulation::new(quiet_config(), home_page())
        .with_form_outcome(Err("mail relay unavailable".to_string()));
    sim.boot(None);
    sim.command(StageCommand::SubmitForm {
        fields: FormFields::default(),
    });
    sim.advance(2000);

    assert_eq!(
        sim.snapshot().form,
        FormPhase::Failed {
            message: "mail relay unavailable".to_string()
        }
    );
}
