use xr_triage::overlay::{self, OverlayBox};
use xr_triage::triage::{Action, Effect, Model};
use xr_triage::types::{AnalysisResult, Detection, DisplayGeometry, Summary};

fn detection(bbox: [f64; 4], class_name: &str, score: f64) -> Detection {
    Detection {
        bbox,
        cls: 0,
        class_name: class_name.to_string(),
        score,
    }
}

fn sample_response_json() -> &'static str {
    r#"{
        "filename": "wrist.png",
        "width": 100,
        "height": 100,
        "detections": [
            { "box": [10, 10, 50, 60], "cls": 1, "class_name": "Radial Fracture", "score": 0.9 },
            { "box": [0, 0, 5, 5], "cls": 0, "class_name": "Healthy", "score": 0.1 }
        ],
        "summary": { "fractured": true, "types": ["Healthy", "Radial Fracture"] }
    }"#
}

#[test]
fn wire_format_decodes_into_the_data_model() {
    let result: AnalysisResult = serde_json::from_str(sample_response_json()).unwrap();

    assert_eq!(result.filename, "wrist.png");
    assert_eq!(result.width, 100);
    assert_eq!(result.detections.len(), 2);
    assert_eq!(result.detections[0].bbox, [10.0, 10.0, 50.0, 60.0]);
    assert_eq!(result.detections[0].class_name, "Radial Fracture");
    assert!(result.summary.fractured);
    assert_eq!(result.summary.types.len(), 2);
}

// The worked example: threshold 0.25, original 100x100 rendered at 200x200.
// Exactly one box survives and lands at {20, 20, 80, 100}.
#[test]
fn threshold_and_geometry_produce_the_expected_overlay() {
    let detections = [
        detection([10.0, 10.0, 50.0, 60.0], "fracture", 0.9),
        detection([0.0, 0.0, 5.0, 5.0], "fracture", 0.1),
    ];

    let boxes = overlay::map_detections(
        DisplayGeometry::new(200.0, 200.0),
        100,
        100,
        &detections,
        0.25,
    );

    assert_eq!(boxes.len(), 1);
    let OverlayBox {
        left,
        top,
        width,
        height,
        ..
    } = boxes[0].clone();
    assert_eq!((left, top, width, height), (20.0, 20.0, 80.0, 100.0));
}

// Full path from submission through completion: the model drives requests,
// the response feeds the verdict and the overlay inputs.
#[test]
fn submit_complete_and_map_end_to_end() {
    let mut model = Model::new();
    model.reduce(Action::SetFilePresent { present: true });

    let effects = model.reduce(Action::Activate);
    let (seq, confidence) = match &effects[..] {
        [Effect::StartRequest { seq, confidence }] => (*seq, *confidence),
        other => panic!("expected StartRequest, got {other:?}"),
    };
    assert_eq!(confidence, 0.25);

    let result: AnalysisResult = serde_json::from_str(sample_response_json()).unwrap();
    model.reduce(Action::RequestSucceeded { seq, result });

    // The type list mixes a fracture label in, so the healthy alias does not
    // override the raw flag.
    assert_eq!(model.status_label(), "Fracture Detected");
    assert_eq!(model.display_confidence(), Some(90));

    let result = model.result().unwrap();
    let geometry = DisplayGeometry::new(200.0, 200.0);
    assert!(overlay::is_positionable(result.width, result.height, geometry));

    let boxes = overlay::map_detections(
        geometry,
        result.width,
        result.height,
        &result.detections,
        model.min_score(),
    );
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].label, "Radial Fracture (90.0%)");
}

#[test]
fn healthy_only_response_reads_as_no_fracture() {
    let mut model = Model::new();
    model.reduce(Action::SetFilePresent { present: true });
    let effects = model.reduce(Action::Submit);
    let seq = match &effects[..] {
        [Effect::StartRequest { seq, .. }] => *seq,
        other => panic!("expected StartRequest, got {other:?}"),
    };

    let result = AnalysisResult {
        filename: "wrist.png".to_string(),
        width: 640,
        height: 480,
        detections: vec![detection([0.0, 0.0, 10.0, 10.0], "Healthy", 0.88)],
        summary: Summary {
            fractured: true,
            types: vec!["Healthy".to_string()],
        },
    };
    model.reduce(Action::RequestSucceeded { seq, result });

    assert_eq!(model.status_label(), "No Fracture Detected");
    assert_eq!(model.verdict().fractured(), Some(false));
    assert_eq!(model.display_confidence(), Some(88));
}

// Rapid threshold adjustment: the slider fires twice before the first
// request resolves; whichever request was issued last decides the outcome.
#[test]
fn rapid_threshold_changes_keep_only_the_newest_response() {
    let mut model = Model::new();
    model.reduce(Action::SetFilePresent { present: true });

    let first = model.reduce(Action::SetThreshold(0.30));
    let second = model.reduce(Action::SetThreshold(0.50));
    let seq_of = |effects: &[Effect]| match effects {
        [Effect::StartRequest { seq, .. }] => *seq,
        other => panic!("expected StartRequest, got {other:?}"),
    };
    let (seq_a, seq_b) = (seq_of(&first), seq_of(&second));

    let named = |name: &str| AnalysisResult {
        filename: name.to_string(),
        width: 100,
        height: 100,
        detections: Vec::new(),
        summary: Summary {
            fractured: false,
            types: Vec::new(),
        },
    };

    model.reduce(Action::RequestSucceeded {
        seq: seq_b,
        result: named("b.png"),
    });
    model.reduce(Action::RequestSucceeded {
        seq: seq_a,
        result: named("a.png"),
    });

    assert_eq!(model.result().map(|r| r.filename.as_str()), Some("b.png"));
    assert_eq!(model.threshold(), 0.50);
}
