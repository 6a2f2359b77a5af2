use crate::domain::edge::DependencyKind;
use crate::domain::extractor::ExtractionStats;
use crate::domain::node::{Member, TypeId, TypeNode};
use crate::domain::type_registry::TypeRegistry;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

/// The result of one analysis run: every node plus the extraction counters
#[derive(Debug, Default)]
pub struct Architecture {
    pub registry: TypeRegistry,
    pub stats: ExtractionStats,
}

impl Architecture {
    pub fn type_by_name(&self, full_name: &str) -> Option<&TypeNode> {
        self.registry
            .find_type(full_name)
            .map(|id| self.registry.type_node(id))
    }

    pub fn member_by_name(&self, full_name: &str) -> Option<&Member> {
        self.registry
            .member_with_full_name(full_name)
            .map(|id| self.registry.member(id))
    }

    /// Analyzed (non-stub) types
    pub fn analyzed_types(&self) -> impl Iterator<Item = &TypeNode> {
        self.registry.types().filter(|t| !t.is_stub)
    }

    pub fn type_graph(&self) -> TypeDependencyGraph {
        TypeDependencyGraph::from_registry(&self.registry)
    }
}

/// Type-level dependencies projected into a directed graph for rule evaluation
pub struct TypeDependencyGraph {
    /// One node per registered type; one edge per type dependency
    pub graph: DiGraph<TypeId, DependencyKind>,

    /// Mapping from type to node index
    pub type_to_node: HashMap<TypeId, NodeIndex>,
}

impl TypeDependencyGraph {
    pub fn from_registry(registry: &TypeRegistry) -> Self {
        let mut graph = DiGraph::new();
        let mut type_to_node = HashMap::new();
        for ty in registry.types() {
            type_to_node.insert(ty.id, graph.add_node(ty.id));
        }
        for ty in registry.types() {
            for dep in &ty.dependencies {
                if let (Some(&source), Some(&target)) =
                    (type_to_node.get(&dep.origin), type_to_node.get(&dep.target))
                {
                    graph.add_edge(source, target, dep.kind);
                }
            }
        }
        Self {
            graph,
            type_to_node,
        }
    }

    pub fn node_of(&self, ty: TypeId) -> Option<NodeIndex> {
        self.type_to_node.get(&ty).copied()
    }

    /// Distinct types `ty` depends on
    pub fn dependencies_of(&self, ty: TypeId) -> Vec<TypeId> {
        self.neighbors(ty, Direction::Outgoing)
    }

    /// Distinct types depending on `ty`
    pub fn dependents_of(&self, ty: TypeId) -> Vec<TypeId> {
        self.neighbors(ty, Direction::Incoming)
    }

    fn neighbors(&self, ty: TypeId, direction: Direction) -> Vec<TypeId> {
        let Some(idx) = self.node_of(ty) else {
            return Vec::new();
        };
        let distinct: BTreeSet<TypeId> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n])
            .collect();
        distinct.into_iter().collect()
    }

    pub fn has_cycles(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Strongly connected groups of types that depend on each other, each sorted by id
    pub fn cycles(&self) -> Vec<Vec<TypeId>> {
        let mut cycles: Vec<Vec<TypeId>> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut types: Vec<TypeId> = component.into_iter().map(|n| self.graph[n]).collect();
                types.sort();
                types
            })
            .collect();
        cycles.sort();
        cycles
    }
}
