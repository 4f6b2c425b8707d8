use std::collections::HashMap;

use crate::ir::{Item, Type};

/// Order items so that a definition precedes its first use. Cycles (only
/// reachable through pointers in valid C) are tolerated: the back edge is
/// ignored and the remaining order is kept.
pub(crate) fn topsort(items: Vec<Item>) -> Vec<Item> {
    let graph: Vec<Vec<usize>> = {
        let index: HashMap<&str, usize> = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.name(), position))
            .collect();

        items
            .iter()
            .map(|item| {
                let mut dependencies = Vec::new();
                item.for_each_type(&mut |ty: &Type| {
                    ty.for_each_path(&mut |name| {
                        if let Some(&dependency) = index.get(name) {
                            if !dependencies.contains(&dependency) {
                                dependencies.push(dependency);
                            }
                        }
                    });
                });
                dependencies
            })
            .collect()
    };

    let order = sort_indices(&graph);
    let mut slots: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect()
}

/// Depth-first postorder over the dependency graph.
fn sort_indices(graph: &[Vec<usize>]) -> Vec<usize> {
    fn visit(
        node: usize,
        graph: &[Vec<usize>],
        done: &mut [bool],
        on_stack: &mut [bool],
        out: &mut Vec<usize>,
    ) {
        if done[node] || on_stack[node] {
            // on_stack means a cycle; break it here
            return;
        }
        on_stack[node] = true;
        for &dependency in &graph[node] {
            visit(dependency, graph, done, on_stack, out);
        }
        on_stack[node] = false;
        done[node] = true;
        out.push(node);
    }

    let mut out = Vec::with_capacity(graph.len());
    let mut done = vec![false; graph.len()];
    let mut on_stack = vec![false; graph.len()];
    for node in 0..graph.len() {
        visit(node, graph, &mut done, &mut on_stack, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Field, Struct, TypeAlias};

    #[test]
    fn sorts_dependencies_first() {
        let graph = vec![vec![1, 2], vec![2], vec![]];
        assert_eq!(sort_indices(&graph), vec![2, 1, 0]);
    }

    #[test]
    fn tolerates_cycles() {
        let graph = vec![vec![1], vec![0], vec![1]];
        let sorted = sort_indices(&graph);
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn orders_items_by_reference() {
        let strct = Item::Struct(Struct {
            name: "Frame".into(),
            generic_params: Vec::new(),
            fields: vec![Field {
                name: "timestamp".into(),
                ty: Type::Path {
                    name: "Timestamp".into(),
                    generics: Vec::new(),
                },
                comments: Vec::new(),
            }],
            comments: Vec::new(),
        });
        let alias = Item::Alias(TypeAlias {
            name: "Timestamp".into(),
            ty: Type::Primitive(crate::ir::Primitive::U64),
            comments: Vec::new(),
        });

        let sorted = topsort(vec![strct, alias]);
        let names: Vec<_> = sorted.iter().map(Item::name).collect();
        assert_eq!(names, ["Timestamp", "Frame"]);
    }
}
