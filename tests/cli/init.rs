use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created .propdocrc.json"));

    let content = test.read_file(".propdocrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["extensions"], serde_json::json!(["js", "jsx", "ts", "tsx"]));
    assert_eq!(parsed["md"], Value::Bool(false));
    assert!(parsed.get("ignores").is_some());
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".propdocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".propdocrc.json already exists"));
    assert_eq!(test.read_file(".propdocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "index.jsx",
        "/** Button */\nexport default function Button() { return <button />; }\nButton.propTypes = {\n  /** 类型 */\n  type: PropTypes.string,\n};\n",
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
