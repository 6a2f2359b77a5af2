use crate::app::dto::DependencyDto;
use crate::app::engine::AnalysisEngine;
use anyhow::Result;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn display_summary(engine: &AnalysisEngine, json: bool) -> Result<()> {
    let summary = engine.summary();
    if json {
        return print_json(&summary);
    }

    println!("Architecture Summary: {}", summary.source_path);
    println!("{}", "=".repeat(60));
    println!("  Types:              {:>8}", summary.type_count);
    println!("  Stub types:         {:>8}", summary.stub_type_count);
    println!("  Members:            {:>8}", summary.member_count);
    println!("  Member dependencies:{:>8}", summary.member_dependency_count);
    println!("  Type dependencies:  {:>8}", summary.type_dependency_count);

    let stats = &summary.stats;
    println!("\n  Extraction:");
    println!("    Methods scanned:       {:>8}", stats.methods);
    println!("    Signature edges:       {:>8}", stats.signature_dependencies);
    println!("    Body type edges:       {:>8}", stats.body_type_dependencies);
    println!("    Call edges:            {:>8}", stats.call_dependencies);
    println!("    Unresolved calls:      {:>8}", stats.unresolved_calls);
    println!("    Linked accessors:      {:>8}", stats.linked_accessors);
    println!("    Unlinked accessors:    {:>8}", stats.unlinked_accessors);
    println!("    Backing fields linked: {:>8}", stats.backing_fields_linked);
    println!("    Backing field calls:   {:>8}", stats.backing_field_calls);

    Ok(())
}

pub fn display_types(engine: &AnalysisEngine, include_stubs: bool, json: bool) -> Result<()> {
    let result = engine.types(include_stubs);
    if json {
        return print_json(&result);
    }

    println!("Found {} type(s):\n", result.items.len());
    for (i, item) in result.items.iter().enumerate() {
        let stub = if item.is_stub { " (stub)" } else { "" };
        println!("{}. [{}] {}{}", i + 1, item.kind, item.full_name, stub);
        println!(
            "   members: {}, type dependencies: {}",
            item.member_count, item.dependency_count
        );
    }

    Ok(())
}

pub fn display_member(engine: &AnalysisEngine, full_name: &str, json: bool) -> Result<()> {
    let result = engine.member(full_name)?;
    if json {
        return print_json(&result);
    }

    let stub = if result.is_stub { " (stub)" } else { "" };
    println!("[{}] {}{}", result.member_kind, result.full_name, stub);
    println!("  Declared in: {}", result.declaring_type);

    if let Some(links) = &result.property {
        println!("  Getter:        {}", links.getter.as_deref().unwrap_or("-"));
        println!("  Setter:        {}", links.setter.as_deref().unwrap_or("-"));
        println!("  Backing field: {}", links.backing_field.as_deref().unwrap_or("-"));
    }
    if let Some(property) = &result.backed_property {
        println!("  Backs property: {}", property);
    }

    print_dependencies("Dependencies", &result.dependencies);
    print_dependencies("Backwards dependencies", &result.backwards_dependencies);
    Ok(())
}

fn print_dependencies(title: &str, dependencies: &[DependencyDto]) {
    println!("\n{} ({}):", title, dependencies.len());
    println!("{}", "=".repeat(60));
    for dep in dependencies {
        let stub = if dep.target_is_stub { " (stub)" } else { "" };
        println!("  {:<18} {} -> {}{}", format!("{:?}", dep.kind), dep.origin, dep.target, stub);
    }
}

pub fn display_cycles(engine: &AnalysisEngine, json: bool) -> Result<()> {
    let result = engine.cycles();
    if json {
        return print_json(&result);
    }

    if result.cycles.is_empty() {
        println!("No type dependency cycles.");
        return Ok(());
    }
    println!("Found {} cycle(s):\n", result.cycles.len());
    for (i, cycle) in result.cycles.iter().enumerate() {
        println!("{}. {}", i + 1, cycle.join(" <-> "));
    }
    Ok(())
}
