use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout_json};

const INPUT: &str = r#"
import React from 'react';
import PropTypes from 'prop-types';

/**
 * Input
 * @description 输入框
 */
export default class Input extends React.Component {
    static propTypes = {
        /**
         * 尺寸
         * @enumdesc 小, 大
         */
        size: PropTypes.oneOf(['small', 'large']),
        /**
         * 输入内容变化时的回调
         * @param {String} value 数据
         */
        onChange: PropTypes.func,
    };

    static defaultProps = {
        size: 'small',
    };

    /**
     * 获取焦点
     */
    focus() {}

    render() {
        return <input />;
    }
}
"#;

const GROUP: &str = r#"
/**
 * Input.Group
 * @order 1
 */
export default class Group extends React.Component {
    static propTypes = {
        /** 前缀 */
        prefix: PropTypes.string,
    };

    render() {
        return null;
    }
}
"#;

fn component_test() -> Result<CliTest> {
    let test = CliTest::with_file("input/index.jsx", INPUT)?;
    test.write_file("input/group.jsx", GROUP)?;
    Ok(test)
}

#[test]
fn test_extract_prints_model() -> Result<()> {
    let test = component_test()?;

    let output = test.extract_command().arg("input").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let model = stdout_json(&output)?;
    assert_eq!(model["name"], "Input");
    assert_eq!(model["description"], "输入框");
    assert_eq!(model["props"]["size"]["type"]["name"], "enum");
    assert_eq!(
        model["props"]["size"]["type"]["value"][1],
        json!({ "value": "'large'", "computed": false, "description": "大" })
    );
    assert_eq!(
        model["props"]["size"]["defaultValue"],
        json!({ "value": "'small'", "computed": false })
    );
    assert_eq!(model["props"]["onChange"]["params"][0]["name"], "value");
    assert_eq!(model["methods"][0]["name"], "focus");

    let subs = model["subComponents"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["name"], "Group");
    assert_eq!(subs[0]["order"], 1);
    assert!(model.get("propsMD").is_none());

    assert!(stderr(&output).contains("Extracted Input (2 props, 1 method, 1 sub-component)"));

    Ok(())
}

#[test]
fn test_extract_with_markdown() -> Result<()> {
    let test = component_test()?;

    let output = test.extract_command().args(["input", "--md"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let model = stdout_json(&output)?;
    let props_md = model["propsMD"].as_str().unwrap();
    assert!(props_md.contains("Param | Description | Type | Default Value"));
    assert!(props_md.contains("**Signature**"));
    assert!(model["methods"][0]["md"].as_str().is_some());

    Ok(())
}

#[test]
fn test_extract_writes_output_file() -> Result<()> {
    let test = component_test()?;

    let output = test
        .extract_command()
        .args(["input", "--out", "api.json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("to api.json"));

    let model: Value = serde_json::from_str(&test.read_file("api.json")?)?;
    assert_eq!(model["name"], "Input");

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = component_test()?;
    test.write_file(
        ".propdocrc.json",
        r#"{ "md": true, "ignores": ["group.jsx"], "output": "docs/api.json" }"#,
    )?;
    std::fs::create_dir(test.root().join("docs"))?;

    let output = test.extract_command().arg("input").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let model: Value = serde_json::from_str(&test.read_file("docs/api.json")?)?;
    assert!(model["propsMD"].is_string());
    assert_eq!(model["subComponents"], json!([]));

    Ok(())
}

#[test]
fn test_extract_without_component_fails() -> Result<()> {
    let test = CliTest::with_file("empty/util.js", "export const x = 1;\n")?;

    let output = test.extract_command().arg("empty").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("No documented component found"));

    Ok(())
}

#[test]
fn test_extract_missing_directory_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("missing").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Directory not found"));

    Ok(())
}

#[test]
fn test_parse_error_aborts_by_default() -> Result<()> {
    let test = component_test()?;
    test.write_file("input/broken.jsx", "export default class {")?;

    let output = test.extract_command().arg("input").output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Error: failed to parse component source"));
    assert!(err.contains("broken.jsx"));

    Ok(())
}

#[test]
fn test_keep_going_skips_broken_files() -> Result<()> {
    let test = component_test()?;
    test.write_file("input/broken.jsx", "export default class {")?;

    let output = test.extract_command().args(["input", "-k"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout_json(&output)?["name"], "Input");
    assert!(stderr(&output).contains("1 file(s) could not be processed (use -v for details)"));

    let output = test.extract_command().args(["input", "-k", "-v"]).output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: failed to parse component source"));

    Ok(())
}

#[test]
fn test_extract_inherits_parent_props() -> Result<()> {
    let test = CliTest::with_file(
        "menu/index.jsx",
        "/** Menu */\nexport default class Menu extends React.Component {\n  static propTypes = {\n    /** 模式 */\n    mode: PropTypes.string,\n  };\n  render() { return null; }\n}\n",
    )?;
    test.write_file(
        "nav/index.jsx",
        "/** Nav */\nexport default class Nav extends React.Component {\n  static propTypes = {\n    /** 类型 */\n    type: PropTypes.string,\n  };\n  render() { return null; }\n}\n",
    )?;
    test.write_file(
        "parents.json",
        r#"{ "Nav": { "name": "Menu", "path": "menu" } }"#,
    )?;

    let output = test
        .extract_command()
        .args(["nav", "--parents", "parents.json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let model = stdout_json(&output)?;
    let keys: Vec<_> = model["props"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["mode", "type"]);

    Ok(())
}
