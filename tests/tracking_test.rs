use std::time::{Duration, Instant};

use labeltrack_rs::classify::ClassifyError;
use labeltrack_rs::detect::{DetectError, DetectionModel, RawDetection};
use labeltrack_rs::integration::{Frame, TrackerPipeline};
use labeltrack_rs::tracker::{BoundingBox, LabelContent, NormalizedPoint, SemanticLabel, TrackState};

struct ScriptedModel {
    detections: Vec<RawDetection>,
}

impl DetectionModel for ScriptedModel {
    fn load(&mut self) -> Result<(), DetectError> {
        Ok(())
    }

    fn infer(
        &mut self,
        _pixels: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<RawDetection>, DetectError> {
        Ok(self.detections.clone())
    }
}

fn detection_at(x: f32, y: f32, w: f32, h: f32) -> RawDetection {
    RawDetection {
        class: "cup".into(),
        bbox: BoundingBox::new(x, y, w, h),
        score: 0.9,
    }
}

fn frame_1000() -> Frame {
    Frame::new(vec![64; 1000 * 1000 * 3], 1000, 1000).unwrap()
}

fn semantic(object: &str) -> SemanticLabel {
    SemanticLabel {
        object: object.into(),
        translation: format!("{object}-translated"),
        example_sentence: String::new(),
        sentence_translation: String::new(),
        confidence: 0.95,
    }
}

fn pipeline_with(detections: Vec<RawDetection>) -> TrackerPipeline<ScriptedModel> {
    let _ = env_logger::builder().is_test(true).try_init();
    TrackerPipeline::with_default_config(ScriptedModel { detections })
}

fn set_detections(pipeline: &mut TrackerPipeline<ScriptedModel>, detections: Vec<RawDetection>) {
    pipeline.detector_mut().model_mut().detections = detections;
}

/// Give the pipeline a stored semantic label through the normal
/// classification path.
fn classify_as(pipeline: &mut TrackerPipeline<ScriptedModel>, object: &str, now: Instant) {
    let (ticket, _) = pipeline
        .begin_classification(&frame_1000(), now)
        .expect("gate should admit the call");
    pipeline.complete_classification(ticket, Ok(vec![semantic(object)]), now);
}

#[test]
fn smoothed_position_approaches_static_detection() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let now = Instant::now();
    let target = NormalizedPoint::new(0.125, 0.1);

    let mut prev_dist = f32::INFINITY;
    for _ in 0..40 {
        let out = pipeline.process_frame(&frame_1000(), now).unwrap();
        let dist = out.position.distance_to(target);
        assert!(dist <= prev_dist, "approach must be monotonic");
        prev_dist = dist;
    }
    assert!(prev_dist < 1e-6);
}

#[test]
fn smoothing_converges_without_overshoot_after_jump() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let now = Instant::now();
    pipeline.process_frame(&frame_1000(), now);

    // The object jumps; the smoothed anchor closes the gap a fifth per
    // frame and never crosses the new raw position.
    set_detections(&mut pipeline, vec![detection_at(600.0, 400.0, 50.0, 50.0)]);
    let target = NormalizedPoint::new(0.625, 0.4);
    let mut prev_dist = f32::INFINITY;
    for _ in 0..60 {
        let out = pipeline.process_frame(&frame_1000(), now).unwrap();
        assert!(out.position.x <= target.x);
        assert!(out.position.y <= target.y);
        let dist = out.position.distance_to(target);
        assert!(dist <= prev_dist);
        prev_dist = dist;
    }
    assert!(prev_dist < 1e-2);
}

#[test]
fn grace_period_holds_through_short_dropout() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let now = Instant::now();
    classify_as(&mut pipeline, "cup", now);

    for _ in 0..10 {
        assert!(pipeline.process_frame(&frame_1000(), now).is_some());
    }

    // 20 missing frames: under the 30-frame grace, the label never hides.
    set_detections(&mut pipeline, vec![]);
    for _ in 0..20 {
        let out = pipeline.process_frame(&frame_1000(), now);
        assert!(out.is_some(), "label must stay visible within grace");
    }
    assert_eq!(pipeline.tracker().state(), TrackState::Holding);

    // Detection resumes; still visible, back to tracking.
    set_detections(&mut pipeline, vec![detection_at(110.0, 100.0, 50.0, 50.0)]);
    assert!(pipeline.process_frame(&frame_1000(), now).is_some());
    assert_eq!(pipeline.tracker().state(), TrackState::Tracking);
}

#[test]
fn grace_expiry_hides_label_and_clears_position() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let now = Instant::now();
    classify_as(&mut pipeline, "cup", now);

    for _ in 0..10 {
        pipeline.process_frame(&frame_1000(), now);
    }

    set_detections(&mut pipeline, vec![]);
    for missing in 1..=40u32 {
        let out = pipeline.process_frame(&frame_1000(), now);
        if missing < 30 {
            assert!(out.is_some(), "frame {missing} should still hold");
        } else {
            assert!(out.is_none(), "frame {missing} should be hidden");
        }
    }
    assert_eq!(pipeline.tracker().state(), TrackState::Empty);
    assert!(pipeline.tracker().smoothed_position().is_none());

    // A new detection brings the label straight back.
    set_detections(&mut pipeline, vec![detection_at(200.0, 200.0, 50.0, 50.0)]);
    let out = pipeline.process_frame(&frame_1000(), now).unwrap();
    assert_eq!(out.position, NormalizedPoint::new(0.225, 0.2));
}

#[test]
fn classification_is_single_flight() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let t0 = Instant::now();

    let (ticket, _) = pipeline.begin_classification(&frame_1000(), t0).unwrap();
    // However many timer ticks fire during the slow request, none go out.
    for i in 1..20 {
        assert!(pipeline
            .begin_classification(&frame_1000(), t0 + Duration::from_secs(i))
            .is_none());
    }
    pipeline.complete_classification(ticket, Ok(vec![semantic("cup")]), t0 + Duration::from_secs(20));
    assert!(pipeline
        .begin_classification(&frame_1000(), t0 + Duration::from_secs(21))
        .is_some());
}

#[test]
fn rate_limit_silences_calls_for_suggested_delay() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let t0 = Instant::now();
    classify_as(&mut pipeline, "cup", t0);

    let (ticket, _) = pipeline
        .begin_classification(&frame_1000(), t0 + Duration::from_secs(2))
        .unwrap();
    pipeline.complete_classification(
        ticket,
        Err(ClassifyError::RateLimited {
            retry_after: Some(Duration::from_secs(10)),
        }),
        t0 + Duration::from_secs(2),
    );

    // No attempt goes out for the suggested 10 seconds.
    for i in 3..12 {
        assert!(pipeline
            .begin_classification(&frame_1000(), t0 + Duration::from_secs(i))
            .is_none());
    }
    assert!(pipeline
        .begin_classification(&frame_1000(), t0 + Duration::from_secs(13))
        .is_some());

    // Degradation is silent: the last known label is still shown.
    let out = pipeline
        .process_frame(&frame_1000(), t0 + Duration::from_secs(13))
        .unwrap();
    match out.content {
        LabelContent::Semantic(label) => assert_eq!(label.object, "cup"),
        LabelContent::Pending => panic!("previous label should survive backoff"),
    }
}

#[test]
fn transient_failure_keeps_previous_label() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let t0 = Instant::now();
    classify_as(&mut pipeline, "cup", t0);

    let later = t0 + Duration::from_secs(2);
    let (ticket, _) = pipeline.begin_classification(&frame_1000(), later).unwrap();
    pipeline.complete_classification(
        ticket,
        Err(ClassifyError::Transport("connection reset".into())),
        later,
    );

    let out = pipeline.process_frame(&frame_1000(), later).unwrap();
    assert!(matches!(out.content, LabelContent::Semantic(_)));
}

#[test]
fn empty_results_clear_text_after_grace_delay() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let t0 = Instant::now();
    classify_as(&mut pipeline, "cup", t0);

    // Two empty rounds in a row with no intervening success.
    let first = t0 + Duration::from_secs(2);
    let (ticket, _) = pipeline.begin_classification(&frame_1000(), first).unwrap();
    pipeline.complete_classification(ticket, Ok(vec![]), first);

    let second = t0 + Duration::from_secs(4);
    let (ticket, _) = pipeline.begin_classification(&frame_1000(), second).unwrap();
    pipeline.complete_classification(ticket, Ok(vec![]), second);

    // Within the clear delay the old text still shows.
    let out = pipeline
        .process_frame(&frame_1000(), second + Duration::from_millis(500))
        .unwrap();
    assert!(matches!(out.content, LabelContent::Semantic(_)));

    // After the delay the text clears while position tracking carries on
    // with the placeholder.
    let out = pipeline
        .process_frame(&frame_1000(), second + Duration::from_millis(1500))
        .unwrap();
    assert!(out.content.is_pending());
    assert_eq!(pipeline.tracker().state(), TrackState::Tracking);
}

#[test]
fn stop_cancels_in_flight_classification() {
    let mut pipeline = pipeline_with(vec![detection_at(100.0, 100.0, 50.0, 50.0)]);
    let t0 = Instant::now();

    pipeline.process_frame(&frame_1000(), t0);
    let (ticket, _) = pipeline.begin_classification(&frame_1000(), t0).unwrap();
    pipeline.stop();

    // The response resolves after teardown and must not touch the tracker.
    pipeline.complete_classification(ticket, Ok(vec![semantic("cup")]), t0 + Duration::from_secs(1));
    assert!(pipeline.tracker().semantic().is_none());
    assert_eq!(pipeline.tracker().state(), TrackState::Empty);
    assert!(pipeline.tracker().smoothed_position().is_none());
}
