use std::io;

use julia_field::{
    Animation, AnimationConfig, CancelToken, DriverState, Field, FieldConfig, FrameFault,
    FrameSink, FrameSnapshot, NoPause, Outcome, PlainSink, RunReport,
};

/// Keeps a copy of everything the driver hands over.
#[derive(Default)]
struct Recorder {
    frames: Vec<(usize, f64, Vec<String>)>,
    faults: Vec<(usize, String)>,
    report: Option<RunReport>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl FrameSink for Recorder {
    fn emit(&mut self, f: &FrameSnapshot<'_>) -> io::Result<()> {
        self.frames.push((f.index, f.t, f.grid.lines()));
        if let Some((at, token)) = &self.cancel_after {
            if f.index == *at {
                token.cancel();
            }
        }
        Ok(())
    }

    fn fault(&mut self, index: usize, fault: &FrameFault) {
        self.faults.push((index, fault.to_string()));
    }

    fn finish(&mut self, report: &RunReport) {
        self.report = Some(*report);
    }
}

/// Refuses every frame.
struct Broken {
    faults: usize,
}

impl FrameSink for Broken {
    fn emit(&mut self, _f: &FrameSnapshot<'_>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
    fn fault(&mut self, _index: usize, fault: &FrameFault) {
        assert!(matches!(fault, FrameFault::Sink(_)));
        self.faults += 1;
    }
}

fn grid_cfg() -> FieldConfig {
    FieldConfig::builder(24, 12).build().unwrap()
}

fn anim(cfg: AnimationConfig) -> Animation {
    Animation::new(&grid_cfg(), cfg)
}

#[test]
fn three_cycles_emit_three_snapshots() {
    let cfg = AnimationConfig::builder().cycles(3).seed(11).build().unwrap();
    let mut a = anim(cfg);
    let mut sink = Recorder::default();
    let report = a.run(&mut sink, &mut NoPause, &CancelToken::new());

    assert_eq!(sink.frames.len(), 3);
    assert_eq!(report.emitted, 3);
    assert_eq!(report.faulted, 0);
    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(a.state(), DriverState::Done(Outcome::Completed));
    assert_eq!(sink.report, Some(report));
    let indices: Vec<usize> = sink.frames.iter().map(|f| f.0).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn interrupt_in_second_cycle_stops_after_two_frames() {
    let cfg = AnimationConfig::builder().cycles(5).seed(11).build().unwrap();
    let cancel = CancelToken::new();
    let mut sink = Recorder {
        cancel_after: Some((1, cancel.clone())),
        ..Recorder::default()
    };
    let mut a = anim(cfg);
    let report = a.run(&mut sink, &mut NoPause, &cancel);

    assert!(sink.frames.len() <= 2);
    assert_eq!(report.emitted, 2);
    assert_eq!(report.outcome, Outcome::Interrupted);
    assert_eq!(a.state(), DriverState::Done(Outcome::Interrupted));
}

#[test]
fn overflowing_time_skips_frames_but_finishes() {
    // t = i * f64::MAX is finite for i ≤ 1 and infinite afterwards
    let cfg = AnimationConfig::builder()
        .cycles(5)
        .step(f64::MAX)
        .noise(0.0)
        .build()
        .unwrap();
    let mut sink = Recorder::default();
    let report = anim(cfg).run(&mut sink, &mut NoPause, &CancelToken::new());

    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(report.emitted, 2);
    assert_eq!(report.faulted, 3);
    let skipped: Vec<usize> = sink.faults.iter().map(|f| f.0).collect();
    assert_eq!(skipped, vec![2, 3, 4]);
    assert!(sink.faults[0].1.contains("not finite"));
}

#[test]
fn sink_failures_are_not_fatal() {
    let cfg = AnimationConfig::builder().cycles(4).build().unwrap();
    let mut sink = Broken { faults: 0 };
    let report = anim(cfg).run(&mut sink, &mut NoPause, &CancelToken::new());
    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(report.emitted, 0);
    assert_eq!(report.faulted, 4);
    assert_eq!(sink.faults, 4);
}

#[test]
fn frames_follow_the_time_schedule() {
    let cfg = AnimationConfig::builder().cycles(4).noise(0.0).build().unwrap();
    let mut sink = Recorder::default();
    anim(cfg).run(&mut sink, &mut NoPause, &CancelToken::new());

    let mut reference = Field::new(&grid_cfg());
    for (i, t, lines) in &sink.frames {
        assert_eq!(*t, *i as f64 * 0.2);
        reference.render(*t).unwrap();
        assert_eq!(lines, &reference.grid().lines());
    }
}

#[test]
fn seeded_noise_is_reproducible() {
    let cfg = || {
        AnimationConfig::builder()
            .cycles(8)
            .noise(0.3)
            .seed(2024)
            .build()
            .unwrap()
    };
    let mut a = Recorder::default();
    let mut b = Recorder::default();
    anim(cfg()).run(&mut a, &mut NoPause, &CancelToken::new());
    anim(cfg()).run(&mut b, &mut NoPause, &CancelToken::new());
    let grids = |r: &Recorder| r.frames.iter().map(|f| f.2.clone()).collect::<Vec<_>>();
    assert_eq!(grids(&a), grids(&b));
}

#[test]
fn noise_leaves_warm_up_frames_and_borders_alone() {
    let cfg = AnimationConfig::builder()
        .cycles(9)
        .noise(1.0)
        .seed(7)
        .build()
        .unwrap();
    let mut sink = Recorder::default();
    anim(cfg).run(&mut sink, &mut NoPause, &CancelToken::new());

    let mut reference = Field::new(&grid_cfg());
    for (i, t, lines) in &sink.frames {
        reference.render(*t).unwrap();
        let clean = reference.grid().lines();
        if *i < 6 {
            assert_eq!(lines, &clean, "frame {i} was noised during warm-up");
            continue;
        }
        let rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
        let clean: Vec<Vec<char>> = clean.iter().map(|l| l.chars().collect()).collect();
        let (h, w) = (rows.len(), rows[0].len());
        for y in 0..h {
            for x in 0..w {
                if y == 0 || y == h - 1 || x == 0 || x == w - 1 {
                    assert_eq!(rows[y][x], clean[y][x], "border ({x},{y}) changed");
                } else {
                    assert!([' ', '·', '░'].contains(&rows[y][x]));
                }
            }
        }
    }
}

#[test]
fn plain_sink_end_to_end() {
    let cfg = AnimationConfig::builder()
        .cycles(3)
        .delay(0.0)
        .seed(1)
        .build()
        .unwrap();
    let mut sink = PlainSink::new(Vec::new());
    let report = anim(cfg).run(&mut sink, &mut NoPause, &CancelToken::new());
    assert_eq!(report.emitted, 3);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    for n in 1..=3 {
        assert!(text.contains(&format!("frame {n}/3")));
    }
    assert!(text.ends_with("done: 3 frames shown, 0 skipped\n"));
}
