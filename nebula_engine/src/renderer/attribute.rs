/// Custom attribute queries
///
/// Upper layers that need to drop down to native API calls ask a render
/// target for its native handles by attribute name. The set of names is
/// closed and identical across backends; a name a backend does not know is
/// a no-op, so pipeline code can probe every backend the same way.

use crate::renderer::NativeHandle;

/// Maximum number of simultaneous color attachments
pub const MAX_COLOR_TARGETS: usize = 8;

/// Queryable attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Native render-target views, one per color slot
    ColorTargets,
    /// Native depth-stencil view, read-write
    DepthStencilView,
    /// Native depth-stencil view, read-only
    ReadOnlyDepthStencilView,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [
        Attribute::ColorTargets,
        Attribute::DepthStencilView,
        Attribute::ReadOnlyDepthStencilView,
    ];

    /// Stable query name
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::ColorTargets => "color-targets",
            Attribute::DepthStencilView => "depth-stencil-view",
            Attribute::ReadOnlyDepthStencilView => "read-only-depth-stencil-view",
        }
    }

    /// Parse a query name
    ///
    /// Accepts the stable names and the short forms `RTV`, `DSV` and `RODSV`.
    /// Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "color-targets" | "RTV" => Some(Attribute::ColorTargets),
            "depth-stencil-view" | "DSV" => Some(Attribute::DepthStencilView),
            "read-only-depth-stencil-view" | "RODSV" => Some(Attribute::ReadOnlyDepthStencilView),
            _ => None,
        }
    }

    /// Allocate an output buffer of the right shape, every slot empty
    pub fn empty_buffer(&self) -> AttributeBuffer {
        match self {
            Attribute::ColorTargets => AttributeBuffer::ColorTargets([None; MAX_COLOR_TARGETS]),
            Attribute::DepthStencilView | Attribute::ReadOnlyDepthStencilView => {
                AttributeBuffer::DepthStencil(None)
            }
        }
    }
}

/// Caller-owned output buffer for attribute queries
///
/// Queries only ever write slots they have a handle for. Slots without an
/// attached view, and the whole buffer when the query does not apply, keep
/// whatever the caller put there. Callers that need deterministic values in
/// unused slots must initialize the buffer themselves (`Attribute::empty_buffer`).
///
/// A buffer whose shape does not match the query (e.g. a `DepthStencil`
/// buffer passed to a `ColorTargets` query) is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeBuffer {
    /// One slot per color attachment index
    ColorTargets([Option<NativeHandle>; MAX_COLOR_TARGETS]),
    /// Single depth-stencil view slot
    DepthStencil(Option<NativeHandle>),
}

impl AttributeBuffer {
    /// Color slots, if this is a color buffer
    pub fn color_targets(&self) -> Option<&[Option<NativeHandle>; MAX_COLOR_TARGETS]> {
        match self {
            AttributeBuffer::ColorTargets(slots) => Some(slots),
            AttributeBuffer::DepthStencil(_) => None,
        }
    }

    /// Depth-stencil slot, if this is a depth-stencil buffer
    pub fn depth_stencil(&self) -> Option<Option<NativeHandle>> {
        match self {
            AttributeBuffer::DepthStencil(handle) => Some(*handle),
            AttributeBuffer::ColorTargets(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;
