//! Component sets and stand-alone components into [`Component`] records.

use crate::component::classify::{
    classify_component, infer_category, normalize_page_name, ClassificationContext,
};
use crate::component::model::{Component, Variant};
use crate::diff::compute_variant_patches;
use crate::errors::{AthenaError, Result};
use crate::host::{NodeKind, SceneNode, StyleCatalog};
use crate::structure::{CollectOptions, StructureCache, StructureNode};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where a component was found
#[derive(Debug, Clone, Copy)]
pub struct DescribeContext<'a> {
    /// Raw page name, markers included
    pub page_name: &'a str,
    /// Top-most section enclosing the component
    pub section_name: Option<&'a str>,
    pub library_name: Option<&'a str>,
}

/// Structure collection inputs shared by every component of one run
pub struct Describer<'a> {
    pub catalog: &'a dyn StyleCatalog,
    pub cache: &'a mut StructureCache,
    pub options: CollectOptions,
}

impl<'a> Describer<'a> {
    pub fn new(
        catalog: &'a dyn StyleCatalog,
        cache: &'a mut StructureCache,
        options: CollectOptions,
    ) -> Self {
        Self {
            catalog,
            cache,
            options,
        }
    }

    fn collect(&mut self, root: &SceneNode) -> Result<Arc<Vec<StructureNode>>> {
        self.cache.get_or_collect(root, self.catalog, self.options)
    }

    /// Describe a component set: the base variant's structure plus one patch
    /// list per sibling variant
    ///
    /// # Errors
    ///
    /// Fails when the set or a variant has no key, when no variant can be
    /// collected, or when a sibling variant cannot be collected.
    pub fn describe_component_set(
        &mut self,
        set: &SceneNode,
        ctx: &DescribeContext<'_>,
    ) -> Result<Component> {
        let key = require_key(set)?;
        let members: Vec<&SceneNode> = set
            .children
            .iter()
            .filter(|child| child.kind == NodeKind::Component)
            .collect();

        let mut variants = Vec::with_capacity(members.len());
        for member in &members {
            variants.push(Variant {
                id: member.id.clone(),
                key: require_key(member)?.to_string(),
                name: member.name.clone(),
            });
        }

        let mut variant_structures = BTreeMap::new();
        let mut structure = Vec::new();

        if let Some((base_index, base)) = self.pick_base(&members)? {
            variant_structures.insert(variants[base_index].key.clone(), Vec::new());
            for (index, member) in members.iter().enumerate() {
                if index == base_index {
                    continue;
                }
                let next = self.collect(member)?;
                let patches = compute_variant_patches(&base, &next);
                tracing::trace!(
                    component_key = %key,
                    variant = %member.name,
                    patch_count = patches.len(),
                    "variant diffed"
                );
                variant_structures.insert(variants[index].key.clone(), patches);
            }
            structure = base.as_ref().clone();
        }

        Ok(self.assemble(set, key, ctx, variants, structure, variant_structures))
    }

    /// Describe a component that is not part of a set
    ///
    /// # Errors
    ///
    /// Fails when the component has no key or cannot be collected.
    pub fn describe_single_component(
        &mut self,
        component: &SceneNode,
        ctx: &DescribeContext<'_>,
    ) -> Result<Component> {
        let key = require_key(component)?;
        let structure = self.collect(component)?.as_ref().clone();
        let variants = vec![Variant {
            id: component.id.clone(),
            key: key.to_string(),
            name: component.name.clone(),
        }];
        let mut variant_structures = BTreeMap::new();
        variant_structures.insert(key.to_string(), Vec::new());

        Ok(self.assemble(component, key, ctx, variants, structure, variant_structures))
    }

    /// First variant whose structure collects, preferring the default one
    fn pick_base(
        &mut self,
        members: &[&SceneNode],
    ) -> Result<Option<(usize, Arc<Vec<StructureNode>>)>> {
        let Some(first) = members.first() else {
            return Ok(None);
        };
        let first_err = match self.collect(first) {
            Ok(list) if !list.is_empty() => return Ok(Some((0, list))),
            Ok(_) => None,
            Err(err) => Some(err),
        };
        for (index, member) in members.iter().enumerate().skip(1) {
            if let Ok(list) = self.collect(member) {
                if !list.is_empty() {
                    tracing::debug!(
                        variant = %member.name,
                        "default variant unusable, falling back"
                    );
                    return Ok(Some((index, list)));
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    fn assemble(
        &self,
        node: &SceneNode,
        key: &str,
        ctx: &DescribeContext<'_>,
        variants: Vec<Variant>,
        structure: Vec<StructureNode>,
        variant_structures: BTreeMap<String, Vec<crate::diff::StructurePatch>>,
    ) -> Component {
        let classification = classify_component(&ClassificationContext {
            component_name: &node.name,
            page_name: Some(ctx.page_name),
            section_name: ctx.section_name,
            library_name: ctx.library_name,
        });
        Component {
            key: key.to_string(),
            name: node.name.clone(),
            page: normalize_page_name(ctx.page_name),
            category: infer_category(&node.name),
            description: node.description.clone().unwrap_or_default(),
            default_variant: variants.first().map(|v| v.key.clone()),
            variants,
            structure,
            variant_structures,
            parent_component: None,
            parent_components: Vec::new(),
            depth: None,
            depth_inside: None,
            depth_actual: None,
            role: classification.role,
            status: classification.status,
            platform: classification.platform,
        }
    }
}

fn require_key(node: &SceneNode) -> Result<&str> {
    match node.key.as_deref() {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(AthenaError::MissingComponentKey {
            node_id: node.id.clone(),
            name: node.name.clone(),
        }),
    }
}
