use super::*;

const DT: f64 = 1.0 / 120.0;

fn id(s: &str) -> TargetId {
    TargetId::from(s)
}

fn run(
    morpher: &mut TextMorpher,
    stage: &mut Stage,
    frames: usize,
    mut on_frame: impl FnMut(f64, &Stage, &[SequenceEvent]),
) {
    let mut t = 0.0;
    for _ in 0..frames {
        let mut out = FrameWrites::new();
        let events = morpher.advance(DT, stage, &mut out);
        stage.commit(&out);
        t += DT;
        on_frame(t, stage, &events);
    }
}

#[test]
fn default_timing() {
    let cfg = GlitchConfig::default();
    assert!((cfg.half_span() - 0.3).abs() < 1e-12);
    assert!((cfg.swap_time() - 0.325).abs() < 1e-12);
    assert!((cfg.total() - 0.65).abs() < 1e-12);
}

#[test]
fn swap_happens_once_while_hidden() {
    let targets = vec![id("title"), id("subtitle")];
    let mut morpher = TextMorpher::new(targets.clone(), GlitchConfig::default()).unwrap();
    let mut stage = Stage::new();
    morpher
        .request(&[(id("title"), "Engineer".into()), (id("subtitle"), "Builder".into())])
        .unwrap();

    let mut swaps = 0;
    let mut finished = false;
    run(&mut morpher, &mut stage, 120, |t, stage, events| {
        for e in events {
            match e {
                SequenceEvent::TextSwapped { .. } => {
                    swaps += 1;
                    let swap_at = GlitchConfig::default().swap_time();
                    assert!(t >= swap_at - 1e-9 && t < swap_at + DT + 1e-9);
                    for target in &targets {
                        assert_eq!(stage.value(target, Property::Opacity), 0.0);
                    }
                }
                SequenceEvent::Finished => finished = true,
                SequenceEvent::Cue(_) => {}
            }
        }
    });

    assert_eq!(swaps, 2);
    assert!(finished);
    assert_eq!(stage.text(&id("title")), Some("Engineer"));
    assert!((stage.value(&id("title"), Property::Opacity) - 1.0).abs() < 1e-12);
    assert_eq!(stage.value(&id("title"), Property::Blur), 0.0);
}

#[test]
fn retrigger_never_compounds_swaps() {
    let mut morpher = TextMorpher::new(vec![id("title")], GlitchConfig::default()).unwrap();
    let mut stage = Stage::new();
    morpher.request(&[(id("title"), "first".into())]).unwrap();
    run(&mut morpher, &mut stage, 12, |_, _, _| {});
    let partial = stage.value(&id("title"), Property::Opacity);
    assert!(partial < 1.0 && partial > 0.0);

    morpher.request(&[(id("title"), "second".into())]).unwrap();
    let mut swapped = Vec::new();
    run(&mut morpher, &mut stage, 120, |_, _, events| {
        for e in events {
            if let SequenceEvent::TextSwapped { text, .. } = e {
                swapped.push(text.clone());
            }
        }
    });
    assert_eq!(swapped, vec!["second".to_string()]);
    assert_eq!(stage.text(&id("title")), Some("second"));
    assert_eq!(morpher.state(), PlayState::Finished);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = GlitchConfig {
        pulse_secs: 0.0,
        ..GlitchConfig::default()
    };
    assert!(matches!(
        TextMorpher::new(vec![id("t")], cfg),
        Err(GlideError::Config(_))
    ));
    assert!(TextMorpher::new(Vec::new(), GlitchConfig::default()).is_err());

    let cfg = GlitchConfig {
        low_opacity: 1.5,
        ..GlitchConfig::default()
    };
    assert!(glitch_morph(&[id("t")], &[], &cfg).is_err());
}

#[test]
fn zero_pulses_is_a_plain_fade_through_black() {
    let cfg = GlitchConfig {
        pulses: 0,
        ..GlitchConfig::default()
    };
    let seq = glitch_morph(&[id("t")], &[(id("t"), "x".into())], &cfg).unwrap();
    let schedule = seq.compile().unwrap();
    assert!((schedule.duration - cfg.total()).abs() < 1e-12);
    assert_eq!(schedule.entries.len(), 3);
}
