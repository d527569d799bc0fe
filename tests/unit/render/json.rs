use super::*;
use crate::foundation::core::OutputParams;
use crate::timeline::video::VideoTrack;

#[test]
fn writes_plan_that_reads_back_equal() {
    let dir = std::env::temp_dir().join("wlmp_json_backend_unit");
    let _ = std::fs::remove_dir_all(&dir);
    let out = dir.join("nested/plan.json");

    let plan = CompositionPlan::assemble(
        OutputParams::default(),
        VideoTrack::default(),
        Vec::new(),
        Vec::new(),
    );
    JsonPlanBackend::default().render(&plan, &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains('\n'));
    let back: CompositionPlan = serde_json::from_str(&text).unwrap();
    assert_eq!(back, plan);

    JsonPlanBackend { pretty: false }.render(&plan, &out).unwrap();
    assert!(!std::fs::read_to_string(&out).unwrap().contains('\n'));
}
