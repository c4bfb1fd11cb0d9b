#![no_main]

use githelper::handlers::{
    CommitContextInput, CommitReportInput, RecentCommitsInput, parse_input, truncate_chars,
};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(args)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let _ = parse_input::<CommitReportInput>(Some(args.clone()));
    let _ = parse_input::<RecentCommitsInput>(Some(args.clone()));
    if let Ok(input) = parse_input::<CommitContextInput>(Some(args))
        && let Some(text) = input.instructions
    {
        let (preview, _) = truncate_chars(&text, 16);
        assert!(text.starts_with(preview));
    }
});
