//! Bounded enumerations: contiguous enums with a `FIRST..COUNT` range, sentinel-terminated
//! stepping, and range validation.
//!
//! A conforming enumeration is normally declared through [`bounded_enum!`](crate::bounded_enum),
//! which fills in the [`BoundedEnum`] contract and the per-variant display names.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use thiserror::Error;

use crate::assertions::{self, AssertionHandler};

/// Marker type for the end-of-enumeration sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnumEnd;

/// The end sentinel. Comparing a value against it tests the `COUNT` boundary.
pub const ENUM_END: EnumEnd = EnumEnd;

/// Raw integer did not name a member of a bounded enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{raw} is outside the {enum_name} range {first}..{count}")]
pub struct EnumRangeError {
    /// Type name of the enumeration.
    pub enum_name: &'static str,
    /// Rejected raw value.
    pub raw: i32,
    /// Raw value of the first member.
    pub first: i32,
    /// Raw value one past the last member.
    pub count: i32,
}

/// Contract for a finite enumeration whose members occupy `FIRST..COUNT` without gaps.
pub trait BoundedEnum: Copy + Eq + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;
    /// Raw value of the first member.
    const FIRST: i32;
    /// Raw value one past the last member. Never itself a member.
    const COUNT: i32;

    /// Raw integer position of this member.
    fn to_raw(self) -> i32;

    /// Member at `raw`, or `None` outside `FIRST..COUNT`.
    fn from_raw(raw: i32) -> Option<Self>;

    /// Stable human-readable name of this member.
    fn name(self) -> &'static str;

    /// Number of members (`COUNT - FIRST`).
    #[must_use]
    fn len() -> usize {
        usize::try_from(Self::COUNT.saturating_sub(Self::FIRST)).unwrap_or(0)
    }

    /// Returns `true` when `raw` lies in `FIRST..COUNT`.
    #[must_use]
    fn is_valid_raw(raw: i32) -> bool {
        raw >= Self::FIRST && raw < Self::COUNT
    }

    /// Members are always in range; provided for symmetry with [`EnumCursor::is_valid`].
    #[must_use]
    fn is_valid(self) -> bool {
        Self::is_valid_raw(self.to_raw())
    }

    /// Reports an out-of-range value to the active assertion handler.
    #[track_caller]
    fn assert_valid(self) {
        self.cursor().assert_valid();
    }

    /// Cursor positioned at this member.
    #[must_use]
    fn cursor(self) -> EnumCursor<Self> {
        EnumCursor::from_raw(self.to_raw())
    }

    /// Cursor positioned at `FIRST`.
    #[must_use]
    fn first() -> EnumCursor<Self> {
        EnumCursor::from_raw(Self::FIRST)
    }

    /// Position one past this member. May equal the end sentinel.
    #[must_use]
    fn successor(self) -> EnumCursor<Self> {
        let mut cursor = self.cursor();
        cursor.increment()
    }

    /// Position one before this member. May fall below `FIRST`.
    #[must_use]
    fn predecessor(self) -> EnumCursor<Self> {
        let mut cursor = self.cursor();
        cursor.decrement()
    }

    /// Iterates every member in declaration order.
    #[must_use]
    fn iter() -> EnumIter<Self> {
        EnumIter::new()
    }

    /// `self < END`.
    #[must_use]
    fn lt_end(self) -> bool {
        self.to_raw() < Self::COUNT
    }

    /// `self == END`.
    #[must_use]
    fn eq_end(self) -> bool {
        self.to_raw() == Self::COUNT
    }

    /// `self != END`.
    #[must_use]
    fn ne_end(self) -> bool {
        !self.eq_end()
    }
}

/// Integer position within a bounded enumeration.
///
/// Unlike `E` itself, a cursor may step outside `FIRST..COUNT`: stepping past the last member
/// lands on the end sentinel, and [`is_valid`](Self::is_valid) then rejects it.
pub struct EnumCursor<E> {
    raw: i32,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for EnumCursor<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumCursor<E> {}

impl<E: BoundedEnum> fmt::Debug for EnumCursor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(member) => write!(f, "{}::{}", E::NAME, member.name()),
            None => write!(f, "{}({})", E::NAME, self.raw),
        }
    }
}

impl<E> PartialEq for EnumCursor<E> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<E> Eq for EnumCursor<E> {}

impl<E> PartialOrd for EnumCursor<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for EnumCursor<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<E> std::hash::Hash for EnumCursor<E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<E> EnumCursor<E> {
    /// Cursor at an arbitrary raw position. No range check.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Raw integer position.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Pre-increment: steps forward and returns the new position.
    ///
    /// Saturates at `i32::MAX`, so a sentinel loop started there still terminates.
    pub const fn increment(&mut self) -> Self {
        self.raw = self.raw.saturating_add(1);
        *self
    }

    /// Pre-decrement: steps backward and returns the new position. Saturates at `i32::MIN`.
    pub const fn decrement(&mut self) -> Self {
        self.raw = self.raw.saturating_sub(1);
        *self
    }

    /// Post-increment: steps forward and returns the position before the step.
    pub const fn post_increment(&mut self) -> Self {
        let orig = *self;
        self.raw = self.raw.saturating_add(1);
        orig
    }

    /// Post-decrement: steps backward and returns the position before the step.
    pub const fn post_decrement(&mut self) -> Self {
        let orig = *self;
        self.raw = self.raw.saturating_sub(1);
        orig
    }
}

impl<E: BoundedEnum> EnumCursor<E> {
    /// Cursor positioned on the end sentinel (`COUNT`).
    #[must_use]
    pub const fn end() -> Self {
        Self::from_raw(E::COUNT)
    }

    /// Returns `true` when the position names a member (`FIRST <= raw < COUNT`).
    #[must_use]
    pub fn is_valid(self) -> bool {
        E::is_valid_raw(self.raw)
    }

    /// Member at this position, if any.
    #[must_use]
    pub fn get(self) -> Option<E> {
        E::from_raw(self.raw)
    }

    /// Member at this position, or the range error describing why there is none.
    pub fn try_get(self) -> Result<E, EnumRangeError> {
        self.get().ok_or(EnumRangeError {
            enum_name: E::NAME,
            raw: self.raw,
            first: E::FIRST,
            count: E::COUNT,
        })
    }

    /// Reports an out-of-range position to the process-wide assertion handler.
    #[track_caller]
    pub fn assert_valid(self) {
        assertions::check_with(self.is_valid(), "enum value in range", || {
            self.range_message()
        });
    }

    /// Reports an out-of-range position to `handler`.
    #[track_caller]
    pub fn assert_valid_with(self, handler: &dyn AssertionHandler) {
        assertions::check_with_handler(handler, self.is_valid(), "enum value in range", || {
            self.range_message()
        });
    }

    fn range_message(self) -> String {
        format!(
            "{} value {} is outside {}..{}",
            E::NAME,
            self.raw,
            E::FIRST,
            E::COUNT
        )
    }
}

impl<E: BoundedEnum> From<E> for EnumCursor<E> {
    fn from(member: E) -> Self {
        member.cursor()
    }
}

impl<E: BoundedEnum> PartialEq<EnumEnd> for EnumCursor<E> {
    fn eq(&self, _: &EnumEnd) -> bool {
        self.raw == E::COUNT
    }
}

impl<E: BoundedEnum> PartialOrd<EnumEnd> for EnumCursor<E> {
    fn partial_cmp(&self, _: &EnumEnd) -> Option<Ordering> {
        Some(self.raw.cmp(&E::COUNT))
    }
}

impl<E: BoundedEnum> PartialEq<E> for EnumCursor<E> {
    fn eq(&self, other: &E) -> bool {
        self.raw == other.to_raw()
    }
}

/// Iterator over every member of `E` following the sentinel protocol: start at `FIRST`,
/// step with increment, stop when the cursor reaches the end.
pub struct EnumIter<E> {
    front: EnumCursor<E>,
    back: EnumCursor<E>,
}

impl<E: BoundedEnum> EnumIter<E> {
    /// Iterator spanning `FIRST..COUNT`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            front: EnumCursor::from_raw(E::FIRST),
            back: EnumCursor::from_raw(E::COUNT),
        }
    }
}

impl<E: BoundedEnum> Default for EnumIter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumIter<E> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<E: BoundedEnum> fmt::Debug for EnumIter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumIter")
            .field("front", &self.front.raw())
            .field("back", &self.back.raw())
            .finish()
    }
}

impl<E: BoundedEnum> Iterator for EnumIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        while self.front < self.back && self.front < ENUM_END {
            if let Some(member) = self.front.post_increment().get() {
                return Some(member);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back.raw().saturating_sub(self.front.raw()))
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl<E: BoundedEnum> DoubleEndedIterator for EnumIter<E> {
    fn next_back(&mut self) -> Option<E> {
        while self.front < self.back {
            if let Some(member) = self.back.decrement().get() {
                return Some(member);
            }
        }
        None
    }
}

impl<E: BoundedEnum> ExactSizeIterator for EnumIter<E> {}

impl<E: BoundedEnum> FusedIterator for EnumIter<E> {}

/// Declares a bounded enumeration.
///
/// Variants receive contiguous `#[repr(i32)]` discriminants starting at `0`, or at the value
/// given after `from`. Each variant is paired with the display name returned by
/// [`BoundedEnum::name`](crate::BoundedEnum::name).
///
/// ```
/// # #![allow(unused_crate_dependencies)]
/// use emulator_utilities::{bounded_enum, BoundedEnum, ENUM_END};
///
/// bounded_enum! {
///     /// Memory card slot.
///     pub enum Slot from 1 {
///         /// First slot.
///         A => "Slot A",
///         /// Second slot.
///         B => "Slot B",
///     }
/// }
///
/// assert_eq!(Slot::FIRST, 1);
/// assert_eq!(Slot::COUNT, 3);
/// assert!(Slot::B.successor() == ENUM_END);
/// assert_eq!(Slot::iter().map(Slot::name).collect::<Vec<_>>(), ["Slot A", "Slot B"]);
/// ```
#[macro_export]
macro_rules! bounded_enum {
    (@sentinel $name:ident) => {
        impl ::core::cmp::PartialEq<$crate::EnumEnd> for $name {
            fn eq(&self, _: &$crate::EnumEnd) -> bool {
                <Self as $crate::BoundedEnum>::eq_end(*self)
            }
        }

        impl ::core::cmp::PartialOrd<$crate::EnumEnd> for $name {
            fn partial_cmp(&self, _: &$crate::EnumEnd) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some(
                    <Self as $crate::BoundedEnum>::to_raw(*self)
                        .cmp(&<Self as $crate::BoundedEnum>::COUNT),
                )
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<Self as $crate::BoundedEnum>::name(*self))
            }
        }

        impl ::core::convert::TryFrom<i32> for $name {
            type Error = $crate::EnumRangeError;

            fn try_from(raw: i32) -> ::core::result::Result<Self, Self::Error> {
                $crate::EnumCursor::<Self>::from_raw(raw).try_get()
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {}
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {}

        impl $name {
            /// Every member in declaration order.
            pub const ALL: &'static [Self] = &[];
        }

        impl $crate::BoundedEnum for $name {
            const NAME: &'static str = stringify!($name);
            const FIRST: i32 = 0;
            const COUNT: i32 = 0;

            fn to_raw(self) -> i32 {
                match self {}
            }

            fn from_raw(_raw: i32) -> ::core::option::Option<Self> {
                ::core::option::Option::None
            }

            fn name(self) -> &'static str {
                match self {}
            }
        }

        $crate::bounded_enum!(@sentinel $name);
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])* $first:ident => $first_label:literal
            $(, $(#[$variant_meta:meta])* $variant:ident => $label:literal)* $(,)?
        }
    ) => {
        $crate::bounded_enum! {
            $(#[$meta])*
            $vis enum $name from 0 {
                $(#[$first_meta])* $first => $first_label
                $(, $(#[$variant_meta])* $variant => $label)*
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident from $base:literal {
            $(#[$first_meta:meta])* $first:ident => $first_label:literal
            $(, $(#[$variant_meta:meta])* $variant:ident => $label:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(i32)]
        $vis enum $name {
            $(#[$first_meta])*
            $first = $base,
            $($(#[$variant_meta])* $variant,)*
        }

        impl $name {
            /// Every member in declaration order.
            pub const ALL: &'static [Self] = &[Self::$first, $(Self::$variant),*];
        }

        impl $crate::BoundedEnum for $name {
            const NAME: &'static str = stringify!($name);
            const FIRST: i32 = $base;
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            const COUNT: i32 = $base + Self::ALL.len() as i32;

            fn to_raw(self) -> i32 {
                self as i32
            }

            fn from_raw(raw: i32) -> ::core::option::Option<Self> {
                let offset = raw.checked_sub(<Self as $crate::BoundedEnum>::FIRST)?;
                let index = usize::try_from(offset).ok()?;
                Self::ALL.get(index).copied()
            }

            fn name(self) -> &'static str {
                match self {
                    Self::$first => $first_label,
                    $(Self::$variant => $label,)*
                }
            }
        }

        $crate::bounded_enum!(@sentinel $name);
    };
}
