use std::path::Path;

use blockdrive::level::model;
use clap::Parser;

use crate::input::Hold;
use crate::{Options, check_model};

#[test]
fn parse_headless_options() {
    let options = Options::try_parse_from([
        "blockdrive-client",
        "--headless",
        "600",
        "--hold",
        "forward,left",
        "--seed",
        "3",
    ])
    .expect("valid options");

    assert_eq!(options.headless, Some(600));
    assert_eq!(options.hold, [Hold::Forward, Hold::Left]);
    assert_eq!(options.seed, Some(3));
    assert!(options.map.is_none());
    assert_eq!(options.assets_dir, Path::new("assets"));
}

#[test]
fn missing_model_is_not_found() {
    let result = check_model("models/none.glb", Path::new("/nonexistent/models/none.glb"));
    assert!(matches!(result, Err(model::Error::NotFound(path)) if path == "models/none.glb"));
}
