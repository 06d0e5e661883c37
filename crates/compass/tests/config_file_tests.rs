// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use compass::{CompassConfig, CompassError};
use std::io::Write;

#[test]
fn test_load_reads_toml_and_environment_key() {
    std::env::set_var("OPENAI_API_KEY", "sk-from-env");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[provider]
model = "gpt-4o"
timeout_seconds = 4

[normalizer]
top_k = 4
"#
    )
    .unwrap();

    let config = CompassConfig::load(file.path()).unwrap();
    assert!(!config.api_key.is_empty());
    assert_eq!(config.provider.timeout_seconds, 4);
    assert_eq!(config.normalizer.top_k, 4);
    assert_eq!(
        config.provider.endpoint,
        "https://api.openai.com/v1/chat/completions"
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CompassConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(CompassError::Io(_))));
}

#[test]
fn test_load_rejects_malformed_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[provider\nmodel = ").unwrap();
    let result = CompassConfig::load(file.path());
    assert!(matches!(result, Err(CompassError::Toml(_))));
}
