use frameit_core::{
    export_frames_json, frame_states, FrameError, FrameIndex, FrameIt, FrameItConfig, FrameSink,
    OutOfRangePolicy, Point3, Projection, Sample, StateSource,
};

fn samples() -> Vec<Sample> {
    vec![
        Sample::new(-1.0, 9.0, 9.0, 9.0),
        Sample::new(0.0, 0.0, 0.0, 0.0),
        Sample::new(0.5, 1.0, 2.0, 3.0),
        Sample::new(1.0, 4.0, 5.0, 6.0),
        Sample::new(3.0, 7.0, 7.0, 7.0),
    ]
}

fn cfg(policy: OutOfRangePolicy) -> FrameItConfig {
    FrameItConfig::default()
        .with_range(0.0, 1.0)
        .with_frames(5)
        .with_quiet(true)
        .with_out_of_range(policy)
}

#[test]
fn drop_policy_excludes_and_tallies() {
    let out = FrameIt::new(cfg(OutOfRangePolicy::Drop))
        .unwrap()
        .run(&samples())
        .unwrap();
    assert_eq!(out.out_of_range, 2);
    assert_eq!(out.bins.point_count(), 3);
    assert_eq!(out.bins[0].points().unwrap(), &[[0.0, 0.0, 0.0]]);
    assert_eq!(out.bins[1].points().unwrap(), &[[1.0, 2.0, 3.0]]);
    assert_eq!(out.bins[3].points().unwrap(), &[[4.0, 5.0, 6.0]]);
    assert!(out.bins[2].is_empty());
    assert_eq!(out.counts.with_events, 3);
    assert_eq!(out.counts.without_events, 1);
}

#[test]
fn clamp_policy_pins_to_edges() {
    let out = FrameIt::new(cfg(OutOfRangePolicy::Clamp))
        .unwrap()
        .run(&samples())
        .unwrap();
    assert_eq!(out.out_of_range, 0);
    assert_eq!(
        out.bins[0].points().unwrap(),
        &[[9.0, 9.0, 9.0], [0.0, 0.0, 0.0]]
    );
    assert_eq!(
        out.bins[3].points().unwrap(),
        &[[4.0, 5.0, 6.0], [7.0, 7.0, 7.0]]
    );
    assert_eq!(out.counts.max_events, 2);
}

#[test]
fn clamp_policy_skips_infinite_times() {
    let eng = FrameIt::new(cfg(OutOfRangePolicy::Clamp).with_frames(3)).unwrap();
    let odd = vec![
        Sample::new(f64::INFINITY, 1.0, 1.0, 1.0),
        Sample::new(f64::NEG_INFINITY, 2.0, 2.0, 2.0),
        Sample::new(f64::NAN, 3.0, 3.0, 3.0),
        Sample::new(2.0, 4.0, 4.0, 4.0),
    ];
    let out = eng.run(&odd).unwrap();
    assert_eq!(out.out_of_range, 3);
    assert_eq!(out.bins.point_count(), 1);
    assert_eq!(out.bins[1].points().unwrap(), &[[4.0, 4.0, 4.0]]);
    assert!(out.bins[0].is_empty());
}

#[test]
fn reject_policy_fails_fast() {
    let err = FrameIt::new(cfg(OutOfRangePolicy::Reject))
        .unwrap()
        .run(&samples())
        .unwrap_err();
    assert_eq!(
        err,
        FrameError::OutOfRange {
            sample: 0,
            t: -1.0,
            start: 0.0,
            end: 1.0
        }
    );
}

#[test]
fn projection_changes_payload_not_labels() {
    let eng = FrameIt::new(cfg(OutOfRangePolicy::Drop).with_projection(Projection::Tz)).unwrap();
    let out = eng.run(&samples()).unwrap();
    assert_eq!(out.bins[1].points().unwrap(), &[[0.5, 3.0, 0.0]]);
    assert_eq!(out.bins[3].points().unwrap(), &[[1.0, 6.0, 0.0]]);
}

#[test]
fn configuration_errors_surface() {
    assert_eq!(
        FrameIt::new(cfg(OutOfRangePolicy::Drop).with_frames(1)).unwrap_err(),
        FrameError::InvalidFrameCount { frames: 1 }
    );
    assert_eq!(
        FrameIt::new(cfg(OutOfRangePolicy::Drop).with_range(2.0, 1.0)).unwrap_err(),
        FrameError::InvalidRange {
            start: 2.0,
            end: 1.0
        }
    );
    // An explicit start past the derived end is still a bad range.
    let late_start = FrameItConfig {
        start: Some(10.0),
        ..FrameItConfig::default()
    };
    assert!(matches!(
        FrameIt::from_states(&samples(), late_start),
        Err(FrameError::InvalidRange { .. })
    ));
}

struct Skewed;

impl StateSource for Skewed {
    fn t(&self) -> Vec<f64> {
        vec![0.0, 0.5, 1.0]
    }

    fn xyz(&self) -> Vec<Point3> {
        vec![[0.0; 3], [1.0; 3]]
    }
}

#[test]
fn mismatched_columns_are_not_truncated() {
    let eng = FrameIt::new(cfg(OutOfRangePolicy::Drop)).unwrap();
    assert_eq!(
        eng.run(&Skewed).unwrap_err(),
        FrameError::MalformedInput {
            times: 3,
            points: 2
        }
    );
}

#[test]
fn quaternion_rows_are_a_state_source() {
    let rows: Vec<[f64; 4]> = vec![
        [1.0, 1.0, 3.0, 4.0],
        [2.0, 2.0, -3.0, -4.0],
        [3.0, 3.0, 3.0, 4.0],
    ];
    let cfg = FrameItConfig::default().with_frames(3).with_quiet(true);
    let (bins, counts) = frame_states(&rows, cfg).unwrap();
    assert_eq!(bins.len(), 2);
    assert_eq!(counts.with_events, 2);
    assert_eq!(bins[0].points().unwrap()[1], [2.0, -3.0, -4.0]);
}

#[derive(Default)]
struct Recorder {
    seen: Vec<(FrameIndex, Option<usize>)>,
}

impl FrameSink for Recorder {
    type Error = String;

    fn frame(&mut self, index: FrameIndex, points: Option<&[Point3]>) -> Result<(), String> {
        self.seen.push((index, points.map(<[Point3]>::len)));
        Ok(())
    }
}

struct FailAt(FrameIndex);

impl FrameSink for FailAt {
    type Error = FrameIndex;

    fn frame(&mut self, index: FrameIndex, _points: Option<&[Point3]>) -> Result<(), FrameIndex> {
        if index == self.0 {
            Err(index)
        } else {
            Ok(())
        }
    }
}

#[test]
fn sink_sees_every_frame_in_order() {
    let out = FrameIt::new(cfg(OutOfRangePolicy::Drop))
        .unwrap()
        .run(&samples())
        .unwrap();
    let mut rec = Recorder::default();
    out.bins.drive(&mut rec).unwrap();
    assert_eq!(
        rec.seen,
        vec![(0, Some(1)), (1, Some(1)), (2, None), (3, Some(1))]
    );

    assert_eq!(out.bins.drive(&mut FailAt(2)), Err(2));
}

#[test]
fn json_export_keeps_empty_frames() {
    let out = FrameIt::new(cfg(OutOfRangePolicy::Drop))
        .unwrap()
        .run(&samples())
        .unwrap();
    let json = export_frames_json(&out);
    let frames = json["bins"].as_array().expect("bins array");
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[2]["type"], "empty");
    assert_eq!(frames[1]["points"][0][2], 3.0);
    assert_eq!(json["counts"]["without_events"], 1);
    assert_eq!(json["out_of_range"], 2);
}
