mod test_utils;

use scenecut_core::ExtractionConfig;
use scenecut_error::SegmentErrorKind;
use scenecut_segment::SceneExtractor;
use test_utils::{CallKind, Reply, ScriptedDriver, scene, scene_json, scenes, scenes_json};

const CHUNK: &str = "Mara waited by the harbour. The lantern swung in the wind.";

#[tokio::test]
async fn valid_reply_maps_one_to_one() {
    let driver = ScriptedDriver::new().script(CallKind::Extraction, vec![scenes_json("a", 3)]);
    let config = ExtractionConfig::default();

    let extraction = SceneExtractor::new(&driver, &config)
        .extract(0, CHUNK)
        .await
        .unwrap();

    assert_eq!(extraction.scenes(), &scenes("a", 3));
    assert!(!*extraction.repaired());
    assert_eq!(driver.total_calls(), 1);
    assert!(driver.prompts_of(CallKind::Extraction)[0].contains(CHUNK));
}

#[tokio::test]
async fn malformed_reply_is_repaired_once() {
    let driver = ScriptedDriver::new()
        .script(CallKind::Extraction, vec!["[{\"mood\": \"calm\",]"])
        .script(CallKind::Repair, vec![scenes_json("fixed", 2)]);
    let config = ExtractionConfig::default();

    let extraction = SceneExtractor::new(&driver, &config)
        .extract(0, CHUNK)
        .await
        .unwrap();

    assert_eq!(extraction.scenes(), &scenes("fixed", 2));
    assert!(*extraction.repaired());
    assert_eq!(driver.calls_of(CallKind::Extraction), 1);
    assert_eq!(driver.calls_of(CallKind::Repair), 1);

    let repair_prompt = &driver.prompts_of(CallKind::Repair)[0];
    assert!(repair_prompt.contains(CHUNK));
    assert!(repair_prompt.contains("[{\"mood\": \"calm\",]"));
    assert!(repair_prompt.contains("invalid JSON"));
}

#[tokio::test]
async fn schema_errors_reach_the_repair_prompt() {
    let incomplete = format!(
        "[{}, {{\"narrative_elements\": \"\", \"characters\": \"\"}}]",
        scene_json("ok")
    );
    let driver = ScriptedDriver::new()
        .script(CallKind::Extraction, vec![incomplete])
        .script(CallKind::Repair, vec![scenes_json("fixed", 2)]);
    let config = ExtractionConfig::default();

    let extraction = SceneExtractor::new(&driver, &config)
        .extract(0, CHUNK)
        .await
        .unwrap();

    assert_eq!(extraction.scenes().len(), 2);
    let repair_prompt = &driver.prompts_of(CallKind::Repair)[0];
    assert!(repair_prompt.contains("scene 1:"));
    assert!(repair_prompt.contains("missing field"));
}

#[tokio::test]
async fn reply_without_json_is_sent_back_whole() {
    let driver = ScriptedDriver::new()
        .script(CallKind::Extraction, vec!["I could not find any scenes."])
        .script(CallKind::Repair, vec!["[]"]);
    let config = ExtractionConfig::default();

    let extraction = SceneExtractor::new(&driver, &config)
        .extract(0, CHUNK)
        .await
        .unwrap();

    assert!(extraction.scenes().is_empty());
    assert!(driver.prompts_of(CallKind::Repair)[0].contains("I could not find any scenes."));
}

#[tokio::test]
async fn object_instead_of_array_is_repairable() {
    let driver = ScriptedDriver::new()
        .script(CallKind::Extraction, vec![scene_json("lonely")])
        .script(CallKind::Repair, vec![format!("[{}]", scene_json("lonely"))]);
    let config = ExtractionConfig::default();

    let extraction = SceneExtractor::new(&driver, &config)
        .extract(0, CHUNK)
        .await
        .unwrap();

    assert_eq!(extraction.scenes(), &vec![scene("lonely")]);
    assert!(*extraction.repaired());
}

#[tokio::test]
async fn failed_repair_is_terminal() {
    let driver = ScriptedDriver::new()
        .script(CallKind::Extraction, vec!["nonsense"])
        .script(CallKind::Repair, vec!["[1, 2]"]);
    let config = ExtractionConfig::default();

    let err = SceneExtractor::new(&driver, &config)
        .extract(7, CHUNK)
        .await
        .unwrap_err();

    match err.kind {
        SegmentErrorKind::ExtractionFailed {
            chunk,
            initial,
            repair,
        } => {
            assert_eq!(chunk, 7);
            assert!(initial.contains("Structural"));
            assert!(repair.contains("scene 0: expected an object"));
        }
        other => panic!("expected ExtractionFailed, got {:?}", other),
    }
    assert_eq!(driver.total_calls(), 2);
}

#[tokio::test]
async fn driver_failure_is_not_repaired() {
    let driver = ScriptedDriver::new().script(
        CallKind::Extraction,
        vec![Reply::Fail("connection reset".to_string())],
    );
    let config = ExtractionConfig::default();

    let err = SceneExtractor::new(&driver, &config)
        .extract(2, CHUNK)
        .await
        .unwrap_err();

    match err.kind {
        SegmentErrorKind::ExtractionFailed { initial, repair, .. } => {
            assert!(initial.contains("connection reset"));
            assert_eq!(repair, "not attempted");
        }
        other => panic!("expected ExtractionFailed, got {:?}", other),
    }
    assert_eq!(driver.calls_of(CallKind::Repair), 0);
}
