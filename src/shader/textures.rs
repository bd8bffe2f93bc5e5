// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

use gl::types::*;
use std::{collections::BTreeMap, fmt};

use crate::graphics::Texture;

/// What a sampler uniform samples from.
#[derive(Copy, Clone)]
pub enum TextureBinding<'t> {
    /// A texture owned by the caller.
    Bound(&'t dyn Texture),

    /// The texture of the object being drawn, supplied at activation.
    DrawTarget,
}

impl fmt::Debug for TextureBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureBinding::Bound(texture) => {
                f.debug_tuple("Bound").field(&texture.native_handle()).finish()
            }
            TextureBinding::DrawTarget => f.write_str("DrawTarget"),
        }
    }
}

impl PartialEq for TextureBinding<'_> {
    /// Bound textures compare by identity, not by content.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextureBinding::Bound(a), TextureBinding::Bound(b)) => {
                std::ptr::addr_eq(*a as *const dyn Texture, *b as *const dyn Texture)
            }
            (TextureBinding::DrawTarget, TextureBinding::DrawTarget) => true,
            _ => false,
        }
    }
}

/// Sampler bindings keyed by uniform location.
///
/// Iteration follows ascending location order, which fixes the order
/// in which texture units are handed out.
#[derive(Debug, Default)]
pub struct TextureTable<'t> {
    slots: BTreeMap<GLint, TextureBinding<'t>>,
    current_texture_slot: Option<GLint>,
}

impl<'t> TextureTable<'t> {
    /// Binds `slot`, replacing whatever it was bound to.
    ///
    /// When the tracked current-texture slot gets a concrete texture, the
    /// tracker moves to the highest slot still sampling the draw target.
    pub fn insert(&mut self, slot: GLint, binding: TextureBinding<'t>) {
        self.slots.insert(slot, binding);
        match binding {
            TextureBinding::DrawTarget => self.current_texture_slot = Some(slot),
            TextureBinding::Bound(_) if self.current_texture_slot == Some(slot) => {
                self.current_texture_slot = self.last_draw_target_slot()
            }
            TextureBinding::Bound(_) => {}
        }
    }

    fn last_draw_target_slot(&self) -> Option<GLint> {
        self.slots
            .iter()
            .rev()
            .find(|(_, binding)| matches!(binding, TextureBinding::DrawTarget))
            .map(|(slot, _)| *slot)
    }

    /// Same table without the borrowed textures.
    ///
    /// Draw-target slots are kept, since they borrow nothing.
    pub fn without_bound<'u>(&self) -> TextureTable<'u> {
        let mut table = TextureTable::default();
        for (slot, binding) in self.iter() {
            if let TextureBinding::DrawTarget = binding {
                table.slots.insert(slot, TextureBinding::DrawTarget);
            }
        }
        table.current_texture_slot = self.current_texture_slot;
        table
    }

    pub fn get(&self, slot: GLint) -> Option<&TextureBinding<'t>> {
        self.slots.get(&slot)
    }

    /// Whether binding a texture to `slot` would need one more texture unit.
    pub fn needs_new_unit(&self, slot: GLint) -> bool {
        !matches!(self.slots.get(&slot), Some(TextureBinding::Bound(_)))
    }

    /// Number of slots bound to caller-owned textures.
    pub fn bound_count(&self) -> usize {
        self.slots
            .values()
            .filter(|binding| matches!(binding, TextureBinding::Bound(_)))
            .count()
    }

    /// Slot most recently set to sample the draw target, among the slots
    /// that still do.
    pub fn current_texture_slot(&self) -> Option<GLint> {
        self.current_texture_slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (GLint, &TextureBinding<'t>)> {
        self.slots.iter().map(|(slot, binding)| (*slot, binding))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.current_texture_slot = None;
    }
}
