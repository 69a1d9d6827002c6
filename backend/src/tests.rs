#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};
    use time::macros::datetime;
    use uuid::Uuid;
    use shared::{Catalog, ErrorCode, ErrorResponse, Module, Priority, VoteMap, VoteResults, VoteSubmission};
    use crate::config::{AppConfig, StorageKind};
    use crate::processor::VoteProcessor;
    use crate::store::{JsonFileVoteStore, MemoryVoteStore, StoreError, VoteStore};
    use crate::{build_rocket, rocket_with};

    const LONG_TITLE: &str = "Sécurisation des secrets avec Azure Key Vault";

    fn test_catalog() -> Catalog {
        let module = |id: &str, title: &str| Module {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            duration: "4 heures".into(),
        };
        Catalog::new(
            vec!["alice".into(), "bob".into(), "carol".into()],
            vec![module("m1", LONG_TITLE), module("m2", "Analyse des logs"), module("m3", "KQL")],
        )
        .unwrap()
    }

    fn client_with(store: Box<dyn VoteStore>) -> Client {
        let processor = VoteProcessor::new(test_catalog(), store);
        Client::tracked(rocket_with(rocket::Config::figment(), processor, None)).expect("valid rocket")
    }

    fn client() -> Client {
        client_with(Box::new(MemoryVoteStore::new()))
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vote_backend_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn submit(client: &Client, body: Value) -> (Status, Value) {
        let res = client
            .post("/api/votes")
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = res.status();
        (status, res.into_json().unwrap())
    }

    fn votes_of(client: &Client, who: &str) -> VoteMap {
        let res = client.get(format!("/api/votes/{}", who)).dispatch();
        assert_eq!(res.status(), Status::Ok);
        res.into_json().unwrap()
    }

    fn error_code(body: &Value) -> ErrorCode {
        serde_json::from_value::<ErrorResponse>(body.clone()).unwrap().code
    }

    #[test]
    fn test_health() {
        let client = client();
        let res = client.get("/api/health").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().unwrap();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_catalog_endpoints() {
        let client = client();
        let participants: Vec<String> = client.get("/api/participants").dispatch().into_json().unwrap();
        assert_eq!(participants, ["alice", "bob", "carol"]);

        let modules: Vec<Module> = client.get("/api/modules").dispatch().into_json().unwrap();
        assert_eq!(modules.len(), 3);
        assert_eq!(modules[0].title, LONG_TITLE);
    }

    #[test]
    fn test_submit_then_get_round_trip() {
        let client = client();
        let (status, body) = submit(&client, json!({"participant": "alice", "votes": {"m1": 1, "m2": 3}}));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["count"], 2);
        assert_eq!(body["message"], "Votes recorded successfully");

        let votes = votes_of(&client, "alice");
        assert_eq!(votes.len(), 2);
        assert_eq!(votes["m1"], Priority::One);
        assert_eq!(votes["m2"], Priority::Three);

        assert!(votes_of(&client, "bob").is_empty());
    }

    #[test]
    fn test_submit_list_form() {
        let client = client();
        let (status, body) = submit(&client, json!({
            "participant": "carol",
            "votes": [{"moduleId": "m3", "priority": 2}]
        }));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["count"], 1);
        assert_eq!(votes_of(&client, "carol")["m3"], Priority::Two);
    }

    #[test]
    fn test_resubmission_replaces_in_full() {
        let client = client();
        submit(&client, json!({"participant": "bob", "votes": {"m1": 1, "m2": 2}}));
        let (status, _) = submit(&client, json!({"participant": "bob", "votes": {"m3": 3}}));
        assert_eq!(status, Status::Ok);

        let votes = votes_of(&client, "bob");
        assert_eq!(votes.len(), 1);
        assert_eq!(votes["m3"], Priority::Three);
    }

    #[test]
    fn test_repeated_upsert_keeps_counts() {
        let client = client();
        let body = json!({"participant": "alice", "votes": {"m1": 2}});
        let (_, first) = submit(&client, body.clone());
        let (_, second) = submit(&client, body);

        let first: time::OffsetDateTime =
            time::OffsetDateTime::parse(first["timestamp"].as_str().unwrap(), &time::format_description::well_known::Rfc3339).unwrap();
        let second: time::OffsetDateTime =
            time::OffsetDateTime::parse(second["timestamp"].as_str().unwrap(), &time::format_description::well_known::Rfc3339).unwrap();
        assert!(second >= first);

        let results: VoteResults = client.get("/api/results").dispatch().into_json().unwrap();
        assert_eq!(results.summary.total_votes, 1);
        assert_eq!(results.detailed_data[0].priority_2, 1);
    }

    #[test]
    fn test_submission_errors() {
        let client = client();
        let cases = [
            (json!({"votes": {"m1": 1}}), ErrorCode::MissingParticipant),
            (json!({"participant": "", "votes": {"m1": 1}}), ErrorCode::MissingParticipant),
            (json!({"participant": "   ", "votes": {"m1": 1}}), ErrorCode::MissingParticipant),
            (json!({"participant": "mallory", "votes": {"m1": 1}}), ErrorCode::InvalidParticipant),
            (json!({"participant": "alice", "votes": {}}), ErrorCode::EmptyVotes),
            (json!({"participant": "alice"}), ErrorCode::EmptyVotes),
            (json!({"participant": "alice", "votes": {"m1": 4}}), ErrorCode::InvalidPriority),
            (json!({"participant": "alice", "votes": {"m1": "high"}}), ErrorCode::InvalidPriority),
            (json!({"participant": "alice", "votes": {"m1": 1, "does-not-exist": 1}}), ErrorCode::UnknownModule),
            (json!({"participant": "alice", "votes": [
                {"moduleId": "m1", "priority": 1},
                {"moduleId": "m1", "priority": 2}
            ]}), ErrorCode::DuplicateModule),
        ];

        for (body, code) in cases {
            let (status, response) = submit(&client, body.clone());
            assert_eq!(status, Status::BadRequest, "body: {}", body);
            assert_eq!(error_code(&response), code, "body: {}", body);
        }

        assert!(votes_of(&client, "alice").is_empty(), "rejected submissions must not be stored");
    }

    #[test]
    fn test_malformed_body() {
        let client = client();
        let res = client
            .post("/api/votes")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch();
        assert!(res.status().code >= 400 && res.status().code < 500);
        let body: ErrorResponse = res.into_json().unwrap();
        assert!(!body.error.is_empty());
    }

    #[test]
    fn test_unauthorized_participant_paths() {
        let client = client();
        let res = client.get("/api/votes/mallory").dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(error_code(&res.into_json().unwrap()), ErrorCode::InvalidParticipant);

        let res = client.delete("/api/votes/mallory").dispatch();
        assert_eq!(res.status(), Status::BadRequest);
    }

    #[test]
    fn test_reset() {
        let client = client();
        submit(&client, json!({"participant": "alice", "votes": {"m1": 1}}));

        let res = client.delete("/api/votes/alice").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().unwrap();
        assert_eq!(body["reset"], true);
        assert_eq!(body["message"], "Votes reset successfully");
        assert!(votes_of(&client, "alice").is_empty());

        let res = client.delete("/api/votes/alice").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().unwrap();
        assert_eq!(body["reset"], false);
        assert_eq!(body["message"], "No votes to reset");
    }

    #[test]
    fn test_results_scenario() {
        let client = client();
        submit(&client, json!({"participant": "alice", "votes": {"m1": 1, "m2": 2}}));
        submit(&client, json!({"participant": "bob", "votes": {"m1": 1}}));

        let res = client.get("/api/results").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: Value = res.into_json().unwrap();

        assert_eq!(body["summary"], json!({
            "total_votes": 3,
            "participants": 2,
            "modules_voted": 2,
            "total_modules": 3,
        }));

        let truncated: String = LONG_TITLE.chars().take(30).chain("...".chars()).collect();
        assert_eq!(body["chart_data"][0]["module"], truncated);
        assert_eq!(body["chart_data"][0]["priority_1"], 2);
        assert_eq!(body["detailed_data"][0]["module"], LONG_TITLE);
        assert_eq!(body["detailed_data"][0]["duration"], "4 heures");
        assert_eq!(body["detailed_data"][1]["priority_2"], 1);
        assert_eq!(body["detailed_data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pie_data"][0]["value"], 2);
        assert_eq!(body["pie_data"][1]["value"], 1);
        assert_eq!(body["pie_data"][2]["value"], 0);

        let details = body["participant_details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["participant"], "alice");
        assert_eq!(details[0]["vote_count"], 2);
    }

    #[test]
    fn test_results_empty() {
        let client = client();
        let results: VoteResults = client.get("/api/results").dispatch().into_json().unwrap();
        assert_eq!(results.summary.total_votes, 0);
        assert_eq!(results.summary.total_modules_in_catalog, 3);
        assert!(results.pie_data.is_empty());
        assert!(results.chart_data.is_empty());
    }

    #[test]
    fn test_chart_data_endpoint() {
        let client = client();
        submit(&client, json!({"participant": "alice", "votes": {"m2": 1, "m3": 2}}));
        submit(&client, json!({"participant": "bob", "votes": {"m3": 3}}));

        let body: Value = client.get("/api/results/chart-data").dispatch().into_json().unwrap();
        assert_eq!(body["labels"], json!(["KQL", "Analyse des logs"]));
        assert_eq!(body["datasets"][0]["data"], json!([0, 1]));
        assert_eq!(body["datasets"][1]["data"], json!([1, 0]));
        assert_eq!(body["datasets"][2]["data"], json!([1, 0]));
        assert_eq!(body["datasets"][0]["borderWidth"], 1);
    }

    #[test]
    fn test_cors_headers() {
        let client = client();
        let res = client
            .get("/api/health")
            .header(Header::new("Origin", "http://example.org"))
            .dispatch();
        assert_eq!(res.headers().get_one("Access-Control-Allow-Origin"), Some("http://example.org"));

        let res = client.options("/api/votes").dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(res.headers().get_one("Access-Control-Allow-Origin"), Some("*"));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = temp_dir();
        let path = dir.join("nested").join("votes.json");

        let store = JsonFileVoteStore::new(&path);
        assert!(store.all().unwrap().is_empty());
        assert!(!store.remove("alice").unwrap());

        let mut votes = VoteMap::new();
        votes.insert("m1".into(), Priority::Two);
        store.put("alice", VoteSubmission::new(votes.clone())).unwrap();

        let reopened = JsonFileVoteStore::new(&path);
        assert_eq!(reopened.get("alice").unwrap().unwrap().votes, votes);

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["alice"]["votes"], json!({"m1": 2}));
        assert!(on_disk["alice"]["timestamp"].is_string());

        assert!(reopened.remove("alice").unwrap());
        assert!(store.get("alice").unwrap().is_none());

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temp files must be renamed away");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_file_store_malformed() {
        let dir = temp_dir();
        let path = dir.join("votes.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let store = JsonFileVoteStore::new(&path);
        assert!(matches!(store.all(), Err(StoreError::Malformed { .. })));

        let client = client_with(Box::new(JsonFileVoteStore::new(&path)));
        let res = client.get("/api/results").dispatch();
        assert_eq!(res.status(), Status::InternalServerError);
        let body: ErrorResponse = res.into_json().unwrap();
        assert_eq!(body.code, ErrorCode::InternalError);
        assert!(body.error.contains("Malformed vote file"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_file_store_reads_offsetless_timestamps() {
        let dir = temp_dir();
        let path = dir.join("votes.json");
        fs::write(&path, r#"{
            "alice": {"timestamp": "2025-06-01T10:00:00.123456", "votes": {"m1": 1}},
            "bob": {"timestamp": "2025-06-01T11:30:00", "votes": {"m1": 2, "m3": 3}}
        }"#).unwrap();

        let store = JsonFileVoteStore::new(&path);
        let alice = store.get("alice").unwrap().unwrap();
        assert_eq!(alice.timestamp, datetime!(2025-06-01 10:00:00.123456 UTC));
        assert_eq!(store.get("bob").unwrap().unwrap().timestamp, datetime!(2025-06-01 11:30 UTC));

        let client = client_with(Box::new(JsonFileVoteStore::new(&path)));
        let res = client.get("/api/results").dispatch();
        assert_eq!(res.status(), Status::Ok);
        let results: VoteResults = res.into_json().unwrap();
        assert_eq!(results.summary.total_votes, 3);
        assert_eq!(results.summary.participant_count, 2);

        let (status, _) = submit(&client, json!({"participant": "carol", "votes": {"m2": 1}}));
        assert_eq!(status, Status::Ok);
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["alice"]["timestamp"], "2025-06-01T10:00:00.123456Z");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_submit_without_json_content_type() {
        let client = client();
        let res = client
            .post("/api/votes")
            .body(json!({"participant": "bob", "votes": {"m3": 2}}).to_string())
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(votes_of(&client, "bob")["m3"], Priority::Two);

        let res = client.post("/api/votes").header(ContentType::Plain).body("not json").dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        let body: ErrorResponse = res.into_json().unwrap();
        assert_eq!(body.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_file_backed_app() {
        let dir = temp_dir();
        let path = dir.join("votes.json");
        let client = client_with(Box::new(JsonFileVoteStore::new(&path)));

        let (status, _) = submit(&client, json!({"participant": "carol", "votes": {"m2": 1}}));
        assert_eq!(status, Status::Ok);
        assert!(path.is_file());
        assert_eq!(votes_of(&client, "carol")["m2"], Priority::One);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_config_from_figment() {
        let dir = temp_dir();
        let catalog_path = dir.join("catalog.json");
        fs::write(&catalog_path, serde_json::to_string(&test_catalog()).unwrap()).unwrap();

        let figment = rocket::Config::figment()
            .merge(("storage", "memory"))
            .merge(("catalog_file", catalog_path.to_string_lossy().to_string()));
        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.load_catalog().unwrap(), test_catalog());

        let client = Client::tracked(build_rocket(figment).unwrap()).unwrap();
        let participants: Vec<String> = client.get("/api/participants").dispatch().into_json().unwrap();
        assert_eq!(participants, ["alice", "bob", "carol"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_figment(&rocket::Config::figment()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.load_catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn test_spa_fallback() {
        let dir = temp_dir();
        fs::write(dir.join("index.html"), "<html>votes</html>").unwrap();
        fs::write(dir.join("app.js"), "console.log('hi')").unwrap();

        let processor = VoteProcessor::new(test_catalog(), Box::new(MemoryVoteStore::new()));
        let client = Client::tracked(rocket_with(rocket::Config::figment(), processor, Some(dir.clone()))).unwrap();

        assert_eq!(client.get("/app.js").dispatch().into_string().unwrap(), "console.log('hi')");
        assert_eq!(client.get("/results/page").dispatch().into_string().unwrap(), "<html>votes</html>");
        assert_eq!(client.get("/api/health").dispatch().status(), Status::Ok);

        fs::remove_dir_all(dir).ok();
    }
}
