// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use std::env;

use custom_processor_stage::config::load_and_validate_stage_definition;
use custom_processor_stage::observability::init_tracing;
use custom_processor_stage::registry;
use custom_processor_stage::testrun::{load_test_case, TestRunner};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <stage.yaml> <testcase.yaml> [testcase.yaml ...]", args[0]);
        eprintln!(
            "Example: {} configs/severity-router.yaml configs/syslog-smoke.testcase.yaml",
            args[0]
        );
        std::process::exit(1);
    }

    init_tracing();

    let stage_file = &args[1];
    let definition = load_and_validate_stage_definition(stage_file)
        .with_context(|| format!("loading stage definition {}", stage_file))?;

    eprintln!(
        "🚀 Stage '{}' hosting '{}' ({} instance(s))",
        definition.name, definition.processor, definition.parallelism
    );

    let runner = TestRunner::new(definition);
    for case_file in &args[2..] {
        let case = load_test_case(case_file)
            .with_context(|| format!("loading test case {}", case_file))?;
        let report = runner
            .run(&case)
            .await
            .with_context(|| format!("running test case '{}'", case.name))?;

        eprintln!(
            "✅ '{}': {} in, {} emitted, {} acked, {} failed",
            report.test_case,
            report.input_count,
            report.emitted(),
            report.acked,
            report.failed
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    registry::global().shutdown();
    Ok(())
}
