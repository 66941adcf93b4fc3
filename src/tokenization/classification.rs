//! Classification tags applied to tokens after tokenization, and the per-token
//! storage that holds them.
//!
//! A tokenizer carries three independent overlays, one per tag family. Each one
//! is allocated the first time something writes to it; until then every token
//! reads back as `Null`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::base::{ContractViolation, violated};

/// A tag type that can be stored in an [`Overlay`].
pub(crate) trait OverlayTag: Copy + Default + Eq + 'static {
    /// Every value in declaration order. The position is the stored byte.
    const ALL: &'static [Self];

    fn to_raw(self) -> u8;

    fn from_raw(raw: u8) -> Self {
        Self::ALL.get(raw as usize).copied().unwrap_or_default()
    }
}

macro_rules! classification {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum $name {
            #[default]
            Null,
            $( $(#[$variant_meta])* $variant, )*
        }

        impl OverlayTag for $name {
            const ALL: &'static [Self] = &[$name::Null, $( $name::$variant, )*];

            fn to_raw(self) -> u8 {
                self as u8
            }
        }
    };
}

classification! {
    /// Tags written by comment parsers.
    pub enum CommentParsingType {
        CommentSymbol,
        CommentDecoration,
        PossibleOpeningTag,
        PossibleClosingTag,
        OpeningTag,
        ClosingTag,
        Url,
        Email,
    }
}

classification! {
    /// Tags written by syntax highlighters.
    pub enum SyntaxHighlightingType {
        Keyword,
        Number,
        String,
        Comment,
        PreprocessingDirective,
        Metadata,
    }
}

classification! {
    /// Tags written by language parsers to describe the parts of a prototype.
    pub enum PrototypeParsingType {
        /// Marks the start of a new section, such as a `where` clause.
        StartOfPrototypeSection,
        /// Marks the end of the current section.
        EndOfPrototypeSection,

        /// The opening symbol of a parameter list. May span several tokens.
        StartOfParams,
        EndOfParams,
        ParamSeparator,
        /// Brackets around a single parameter, like `[in]` in some IDLs.
        OpeningParamDecorator,
        ClosingParamDecorator,

        Type,
        /// Modifiers such as `const`, `*` or `&`.
        TypeModifier,
        /// Qualifiers prefixed to a type, such as `std.` in `std.string`.
        TypeQualifier,
        /// Opens a block attached to a type, like `<` in `List<int>`.
        OpeningTypeModifier,
        ClosingTypeModifier,

        StartOfTuple,
        EndOfTuple,
        TupleMemberSeparator,
        TupleMemberName,

        /// Separates a name from its type, like `:` in Pascal.
        NameTypeSeparator,
        Name,
        /// A name that is also a language keyword, such as `operator`.
        KeywordName,

        /// Modifiers that apply to the parameter rather than the type.
        ParamModifier,
        OpeningParamModifier,
        ClosingParamModifier,

        DefaultValueSeparator,
        DefaultValue,

        PropertyValueSeparator,
        PropertyValue,

        /// Symbols that extend the one before them, like `*` in `(*`.
        OpeningExtensionSymbol,
        ClosingExtensionSymbol,
    }
}

/// Per-token tag storage for one overlay family.
///
/// Slots are atomics so that overlays can be written through a shared
/// [`Tokenizer`](super::Tokenizer). Writers are expected to finish before the
/// tokenizer is handed to other threads, so relaxed ordering is enough.
pub(crate) struct Overlay<T> {
    slots: OnceLock<Box<[AtomicU8]>>,
    _tag: PhantomData<fn() -> T>,
}

impl<T: OverlayTag> Overlay<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: OnceLock::new(),
            _tag: PhantomData,
        }
    }

    pub(crate) fn is_allocated(&self) -> bool {
        self.slots.get().is_some()
    }

    fn allocate(&self, token_count: usize) -> &[AtomicU8] {
        self.slots
            .get_or_init(|| (0..token_count).map(|_| AtomicU8::new(0)).collect())
    }

    /// Returns the tag at `index`, or `Null` if it's out of range or unallocated.
    pub(crate) fn get(&self, index: isize) -> T {
        if index < 0 {
            return T::default();
        }

        self.slots
            .get()
            .and_then(|slots| slots.get(index as usize))
            .map_or_else(T::default, |slot| T::from_raw(slot.load(Ordering::Relaxed)))
    }

    pub(crate) fn set(&self, index: usize, tag: T, token_count: usize) {
        let slots = self.allocate(token_count);

        match slots.get(index) {
            Some(slot) => slot.store(tag.to_raw(), Ordering::Relaxed),
            None => violated(ContractViolation::OutOfBounds),
        }
    }

    /// Sets every tag from `start` up to but not including `end`.
    pub(crate) fn set_range(&self, start: usize, end: usize, tag: T, token_count: usize) {
        if start > end {
            violated(ContractViolation::ReversedRange);
        }
        if end > token_count {
            violated(ContractViolation::OutOfBounds);
        }

        let slots = self.allocate(token_count);
        let raw = tag.to_raw();

        for slot in &slots[start..end] {
            slot.store(raw, Ordering::Relaxed);
        }
    }

    /// Copies a sub-range into a new overlay. Unallocated overlays stay unallocated.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> Self {
        let copy = Self::new();

        if let Some(slots) = self.slots.get() {
            let copied: Box<[AtomicU8]> = slots[start..end]
                .iter()
                .map(|slot| AtomicU8::new(slot.load(Ordering::Relaxed)))
                .collect();
            let _ = copy.slots.set(copied);
        }

        copy
    }

    /// Builds an allocated overlay from a list of tags.
    pub(crate) fn from_tags(tags: &[T]) -> Self {
        let overlay = Self::new();
        let slots: Box<[AtomicU8]> = tags.iter().map(|tag| AtomicU8::new(tag.to_raw())).collect();
        let _ = overlay.slots.set(slots);
        overlay
    }
}

impl<T> fmt::Debug for Overlay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slots.get() {
            Some(slots) => write!(f, "Overlay({} tokens)", slots.len()),
            None => f.write_str("Overlay(unallocated)"),
        }
    }
}
