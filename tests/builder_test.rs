//! Whole-build behavior: node allocation, backwards linking and the type graph.

mod common;

use archdeps::domain::builder::{ArchitectureBuilder, link_backwards_dependencies};
use archdeps::domain::edge::{DependencyKind, DependencyTarget};
use archdeps::domain::metadata::{TypeKind, TypeReference, Visibility};
use archdeps::domain::options::ExtractionOptions;
use archdeps::domain::type_registry::TypeRegistry;
use common::fixtures::*;

const CART: &str = "Shop.Cart";
const BILLING: &str = "Billing.Gateway";

fn shop_and_billing() -> Vec<archdeps::domain::metadata::AssemblyMetadata> {
    let cart = TypeBuilder::class(CART)
        .method(with_body(
            method(CART, "Checkout", VOID, &[]),
            vec![call(BILLING, "Charge", VOID, &[CART]), ret()],
        ))
        .build();
    let gateway = TypeBuilder::class(BILLING)
        .method(method(BILLING, "Charge", VOID, &[CART]))
        .method(with_body(
            method(BILLING, "Refund", VOID, &[]),
            vec![call(CART, "Checkout", VOID, &[]), ret()],
        ))
        .build();
    vec![assembly("Shop", vec![cart]), assembly("Billing", vec![gateway])]
}

#[test]
fn test_types_across_assemblies_are_not_stubs() {
    let arch = ArchitectureBuilder::default().build(&shop_and_billing()).unwrap();

    let cart = arch.type_by_name(CART).unwrap();
    let gateway = arch.type_by_name(BILLING).unwrap();
    assert!(!cart.is_stub);
    assert!(!gateway.is_stub);
    assert_eq!(cart.assembly.as_deref(), Some("Shop"));
    assert_eq!(gateway.assembly.as_deref(), Some("Billing"));
    assert_eq!(arch.analyzed_types().count(), 2);
    // System.Void is the only external reference.
    assert_eq!(arch.registry.stub_type_count(), 1);
}

#[test]
fn test_backwards_dependencies_mirror_calls() {
    let arch = ArchitectureBuilder::default().build(&shop_and_billing()).unwrap();

    let charge_id = arch
        .registry
        .member_with_full_name("Billing.Gateway::Charge(Shop.Cart)")
        .unwrap();
    let checkout_id = arch.registry.member_with_full_name("Shop.Cart::Checkout()").unwrap();

    let charge = arch.registry.member(charge_id);
    assert_eq!(charge.backwards_dependencies().len(), 1);
    let back = &charge.backwards_dependencies()[0];
    assert_eq!(back.kind(), DependencyKind::MethodCall);
    assert_eq!(back.origin(), checkout_id);
    assert_eq!(back.target(), DependencyTarget::Member(charge_id));
}

#[test]
fn test_type_dependencies_exclude_same_type_edges() {
    let cart = TypeBuilder::class(CART)
        .method(method(CART, "Helper", VOID, &[]))
        .method(with_body(
            method(CART, "Checkout", CART, &[]),
            vec![call(CART, "Helper", VOID, &[]), ret()],
        ))
        .build();
    let arch = ArchitectureBuilder::default()
        .build(&[assembly("Shop", vec![cart])])
        .unwrap();

    let cart = arch.type_by_name(CART).unwrap();
    // Only Helper's System.Void return type crosses a type boundary.
    assert_eq!(cart.dependencies.len(), 1);
    assert!(cart.dependencies.iter().all(|d| d.target != cart.id));
    let void = arch.type_by_name(VOID).unwrap();
    assert_eq!(void.backwards_dependencies.len(), 1);
    assert_eq!(void.backwards_dependencies[0].origin, cart.id);
}

#[test]
fn test_cycles_between_analyzed_types() {
    let arch = ArchitectureBuilder::default().build(&shop_and_billing()).unwrap();
    let graph = arch.type_graph();

    let cart = arch.type_by_name(CART).unwrap().id;
    let gateway = arch.type_by_name(BILLING).unwrap().id;
    assert!(graph.has_cycles());
    assert_eq!(graph.cycles(), vec![vec![cart, gateway]]);
    assert!(graph.dependencies_of(cart).contains(&gateway));
    assert!(graph.dependents_of(cart).contains(&gateway));
}

#[test]
fn test_backwards_pass_can_be_disabled() {
    let options = ExtractionOptions {
        link_backwards: false,
        ..ExtractionOptions::default()
    };
    let arch = ArchitectureBuilder::new(options).build(&shop_and_billing()).unwrap();

    assert!(arch.registry.members().all(|m| m.backwards_dependencies().is_empty()));
    assert!(arch.registry.types().all(|t| t.dependencies.is_empty()));
    assert!(!arch.type_graph().has_cycles());
}

#[test]
fn test_duplicate_type_keeps_first_definition() {
    let first = TypeBuilder::class(CART)
        .method(method(CART, "Checkout", VOID, &[]))
        .build();
    let second = TypeBuilder::class(CART)
        .method(method(CART, "Clear", VOID, &[]))
        .build();
    let arch = ArchitectureBuilder::default()
        .build(&[assembly("Shop", vec![first]), assembly("Shop.Copy", vec![second])])
        .unwrap();

    assert!(arch.member_by_name("Shop.Cart::Checkout()").is_some());
    assert!(arch.member_by_name("Shop.Cart::Clear()").is_none());
    assert_eq!(arch.stats.methods, 1);
}

#[test]
fn test_stub_is_promoted_in_place() {
    let mut registry = TypeRegistry::new();
    let stub = registry.get_or_create_type(&TypeReference::new(CART));
    assert!(registry.type_node(stub).is_stub);

    let promoted = registry.register_type(
        &TypeReference::in_assembly(CART, "Shop"),
        TypeKind::Class,
        Visibility::Public,
    );
    assert_eq!(stub, promoted);
    let node = registry.type_node(promoted);
    assert!(!node.is_stub);
    assert_eq!(node.kind, TypeKind::Class);
    assert_eq!(node.assembly.as_deref(), Some("Shop"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_link_backwards_on_empty_registry() {
    let mut registry = TypeRegistry::new();
    assert_eq!(link_backwards_dependencies(&mut registry), 0);
}
