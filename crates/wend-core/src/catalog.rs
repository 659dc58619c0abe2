//! The template catalog and permitted-segment selections.

use crate::error::CatalogError;
use crate::template::{TemplateId, TemplateSegment, TerrainTemplate};
use indexmap::IndexSet;
use std::collections::HashSet;

/// A compact reference to one segment of one template in a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentRef {
    /// Index of the template within the catalog.
    pub template: u32,
    /// Index of the segment within the template.
    pub segment: u32,
}

/// The authored template collection a map generator works from.
///
/// Shared read-only between all tiling paths; the search interns its
/// terminal labels and indexes its segments by [`SegmentRef`].
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    templates: Vec<TerrainTemplate>,
}

impl TemplateCatalog {
    /// Build a catalog, rejecting duplicate template ids.
    pub fn new(templates: Vec<TerrainTemplate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for t in &templates {
            if !seen.insert(t.id()) {
                return Err(CatalogError::DuplicateTemplateId {
                    template: t.id().0,
                });
            }
        }
        Ok(Self { templates })
    }

    /// All templates, in authored order.
    pub fn templates(&self) -> &[TerrainTemplate] {
        &self.templates
    }

    /// Look up a template by id.
    pub fn template(&self, id: TemplateId) -> Option<&TerrainTemplate> {
        self.templates.iter().find(|t| t.id() == id)
    }

    /// Resolve a segment reference to its template and segment.
    ///
    /// # Panics
    ///
    /// Panics when the reference does not point into this catalog;
    /// references are only ever minted by [`Self::iter_segments`].
    pub fn resolve(&self, r: SegmentRef) -> (&TerrainTemplate, &TemplateSegment) {
        let template = &self.templates[r.template as usize];
        (template, &template.segments()[r.segment as usize])
    }

    /// Enumerate every segment in the catalog with its reference.
    pub fn iter_segments(
        &self,
    ) -> impl Iterator<Item = (SegmentRef, &TerrainTemplate, &TemplateSegment)> {
        self.templates.iter().enumerate().flat_map(|(ti, t)| {
            t.segments().iter().enumerate().map(move |(si, s)| {
                (
                    SegmentRef {
                        template: ti as u32,
                        segment: si as u32,
                    },
                    t,
                    s,
                )
            })
        })
    }

    /// Segments whose start, interior, and end types are each drawn from
    /// the corresponding permitted type list.
    pub fn find_segments(
        &self,
        start_types: &[&str],
        inner_types: &[&str],
        end_types: &[&str],
    ) -> Vec<SegmentRef> {
        self.iter_segments()
            .filter(|(_, _, s)| {
                start_types.iter().any(|t| s.has_start_type(t))
                    && inner_types.iter().any(|t| s.has_inner_type(t))
                    && end_types.iter().any(|t| s.has_end_type(t))
            })
            .map(|(r, _, _)| r)
            .collect()
    }
}

/// The segments a tiling is allowed to lay, split by role.
///
/// `start` segments may touch the path's start terminal, `end` segments
/// its end terminal, and `inner` segments define the connection types
/// permitted in the interior. A segment may appear in several roles;
/// the search enumerates the union.
#[derive(Clone, Debug)]
pub struct PermittedSegments<'a> {
    catalog: &'a TemplateCatalog,
    start: Vec<SegmentRef>,
    inner: Vec<SegmentRef>,
    end: Vec<SegmentRef>,
}

impl<'a> PermittedSegments<'a> {
    /// Permit the same selection in every role: all segments whose
    /// terminal and interior types are drawn from `types`.
    pub fn from_inner(catalog: &'a TemplateCatalog, types: &[&str]) -> Self {
        let selection = catalog.find_segments(types, types, types);
        Self {
            catalog,
            start: selection.clone(),
            inner: selection.clone(),
            end: selection,
        }
    }

    /// Permit distinct terminal types at the path's ends: start
    /// segments lead from `start_types` into `inner_types`, end
    /// segments lead from `inner_types` out to `end_types`.
    pub fn with_terminals(
        catalog: &'a TemplateCatalog,
        inner_types: &[&str],
        start_types: &[&str],
        end_types: &[&str],
    ) -> Self {
        Self {
            catalog,
            start: catalog.find_segments(start_types, inner_types, inner_types),
            inner: catalog.find_segments(inner_types, inner_types, inner_types),
            end: catalog.find_segments(inner_types, inner_types, end_types),
        }
    }

    /// Assemble from explicit role selections.
    pub fn from_parts(
        catalog: &'a TemplateCatalog,
        start: Vec<SegmentRef>,
        inner: Vec<SegmentRef>,
        end: Vec<SegmentRef>,
    ) -> Self {
        Self {
            catalog,
            start,
            inner,
            end,
        }
    }

    /// The catalog the references point into.
    pub fn catalog(&self) -> &'a TemplateCatalog {
        self.catalog
    }

    /// Segments permitted to touch the start terminal.
    pub fn start(&self) -> &[SegmentRef] {
        &self.start
    }

    /// Segments permitted in the interior.
    pub fn inner(&self) -> &[SegmentRef] {
        &self.inner
    }

    /// Segments permitted to touch the end terminal.
    pub fn end(&self) -> &[SegmentRef] {
        &self.end
    }

    /// Union of all roles, first-sight order, deduplicated.
    ///
    /// This is the set of segments a search can touch.
    pub fn all(&self) -> Vec<SegmentRef> {
        let mut set: IndexSet<SegmentRef> = IndexSet::new();
        set.extend(self.start.iter().copied());
        set.extend(self.inner.iter().copied());
        set.extend(self.end.iter().copied());
        set.into_iter().collect()
    }
}
