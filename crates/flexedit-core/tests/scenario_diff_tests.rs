use flexedit_core::ScenarioDiff;
use serde_json::{json, Value};

fn empty_commit_data() -> Value {
    json!({
        "insertions": {
            "object": [],
            "relationship": [],
            "alternative": [],
            "scenario": [],
            "scenario_alternative": [],
            "parameter_value": [],
        },
        "updates": {
            "object": [],
            "relationship": [],
            "alternative": [],
            "parameter_value": [],
        },
        "deletions": {
            "object": [],
            "relationship": [],
            "alternative": [],
            "scenario": [],
            "parameter_value": [],
        },
    })
}

fn commit_json(diff: &ScenarioDiff) -> Value {
    serde_json::to_value(diff.commit_data()).expect("commit data must serialize")
}

fn alternatives(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn nothing_is_pending_initially() {
    let diff = ScenarioDiff::new();
    assert!(!diff.is_pending());
    assert_eq!(commit_json(&diff), empty_commit_data());
}

#[test]
fn inserted_alternative_appears_in_insertions() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("my_alternative");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["insertions"]["alternative"] = json!([{ "name": "my_alternative" }]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn renamed_alternative_appears_in_updates() {
    let mut diff = ScenarioDiff::new();
    diff.update_alternative("my_alternative", Some(23), "renamed");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["updates"]["alternative"] = json!([{ "id": 23, "name": "renamed" }]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn renaming_an_inserted_alternative_renames_the_insertion() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("my_alternative");
    diff.update_alternative("my_alternative", None, "renamed");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["insertions"]["alternative"] = json!([{ "name": "renamed" }]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn renaming_back_to_the_committed_name_collapses_to_nothing() {
    let mut diff = ScenarioDiff::new();
    diff.update_alternative("my_alternative", Some(23), "renamed");
    diff.update_alternative("renamed", Some(23), "renamed_again");
    diff.update_alternative("renamed_again", Some(23), "my_alternative");
    assert!(!diff.is_pending());
    assert_eq!(commit_json(&diff), empty_commit_data());
}

#[test]
fn deleted_alternative_appears_in_deletions() {
    let mut diff = ScenarioDiff::new();
    diff.delete_alternative(Some(23), "my_alternative");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["deletions"]["alternative"] = json!([23]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn deleting_a_renamed_alternative_collapses_to_a_deletion() {
    let mut diff = ScenarioDiff::new();
    diff.update_alternative("my_alternative", Some(23), "renamed");
    diff.delete_alternative(Some(23), "renamed");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["deletions"]["alternative"] = json!([23]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn deleting_an_inserted_alternative_removes_it() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("my_alternative");
    diff.delete_alternative(None, "my_alternative");
    assert!(!diff.is_pending());
}

#[test]
fn deleted_scenario_appears_in_deletions() {
    let mut diff = ScenarioDiff::new();
    diff.delete_scenario(Some(66), "my_scenario");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["deletions"]["scenario"] = json!([66]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn deleting_an_uncommitted_scenario_removes_it() {
    let mut diff = ScenarioDiff::new();
    diff.insert_scenario_alternatives(None, "my_scenario", &alternatives(&["my_alternative"]));
    diff.delete_scenario(None, "my_scenario");
    assert!(!diff.is_pending());
    assert_eq!(commit_json(&diff), empty_commit_data());
}

#[test]
fn deleting_a_replaced_scenario_drops_its_alternative_insertions() {
    let mut diff = ScenarioDiff::new();
    diff.insert_scenario_alternatives(
        Some(66),
        "my_scenario",
        &alternatives(&["alternative_1", "alternative_2"]),
    );
    diff.delete_scenario(Some(66), "my_scenario");
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["deletions"]["scenario"] = json!([66]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn replacing_an_existing_scenario_deletes_and_recreates_it() {
    let mut diff = ScenarioDiff::new();
    diff.insert_scenario_alternatives(
        Some(66),
        "my_scenario",
        &alternatives(&["alternative_1", "alternative_2"]),
    );
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["deletions"]["scenario"] = json!([66]);
    expected["insertions"]["scenario"] = json!([{ "name": "my_scenario" }]);
    expected["insertions"]["scenario_alternative"] = json!([
        {
            "scenario_name": "my_scenario",
            "alternative_name": "alternative_1",
            "rank": 0,
        },
        {
            "scenario_name": "my_scenario",
            "alternative_name": "alternative_2",
            "rank": 1,
        },
    ]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn brand_new_scenario_inserts_without_a_deletion() {
    let mut diff = ScenarioDiff::new();
    diff.insert_scenario_alternatives(None, "my_scenario", &alternatives(&["Base"]));
    let mut expected = empty_commit_data();
    expected["insertions"]["scenario"] = json!([{ "name": "my_scenario" }]);
    expected["insertions"]["scenario_alternative"] = json!([
        { "scenario_name": "my_scenario", "alternative_name": "Base", "rank": 0 },
    ]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn restaging_a_scenario_keeps_its_original_id() {
    let mut diff = ScenarioDiff::new();
    diff.insert_scenario_alternatives(Some(66), "my_scenario", &alternatives(&["Base"]));
    diff.insert_scenario_alternatives(None, "my_scenario", &alternatives(&["Base", "High"]));
    let data = diff.commit_data();
    assert_eq!(data.deletions.scenario, vec![66]);
    assert_eq!(data.insertions.scenario_alternative.len(), 2);
}

#[test]
fn clear_pending_scenarios_keeps_alternative_edits() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("my_alternative");
    diff.insert_scenario_alternatives(None, "my_scenario", &alternatives(&["my_alternative"]));
    diff.clear_pending_scenarios();
    assert!(diff.is_pending());
    let mut expected = empty_commit_data();
    expected["insertions"]["alternative"] = json!([{ "name": "my_alternative" }]);
    assert_eq!(commit_json(&diff), expected);
}

#[test]
fn disjoint_edits_sum_in_the_payload() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("a");
    diff.update_alternative("b", Some(1), "b2");
    diff.delete_alternative(Some(2), "c");
    diff.insert_scenario_alternatives(None, "s1", &alternatives(&["a"]));
    diff.delete_scenario(Some(3), "s2");
    let data = diff.commit_data();
    assert_eq!(data.insertions.alternative.len(), 1);
    assert_eq!(data.updates.alternative.len(), 1);
    assert_eq!(data.deletions.alternative.len(), 1);
    assert_eq!(data.insertions.scenario.len(), 1);
    assert_eq!(data.insertions.scenario_alternative.len(), 1);
    assert_eq!(data.deletions.scenario, vec![3]);
}

#[test]
fn clear_pending_resets_everything() {
    let mut diff = ScenarioDiff::new();
    diff.insert_alternative("my_alternative");
    diff.insert_scenario_alternatives(None, "my_scenario", &alternatives(&["my_alternative"]));
    diff.clear_pending();
    assert!(!diff.is_pending());
    assert_eq!(commit_json(&diff), empty_commit_data());
}
