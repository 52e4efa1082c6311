//! # Internal Macros
//!
//! Boilerplate reduction for the zerocopy header structs.
//!
//! ## zerocopy_accessors!
//!
//! Generates getter and setter methods for struct fields that use the
//! little-endian wrapper types (U16, U32).
//!
//! ### Usage
//!
//! ```ignore
//! use zerocopy::little_endian::{U16, U32};
//!
//! #[repr(C)]
//! struct Header {
//!     record_count: U32,
//!     record_len: U16,
//! }
//!
//! impl Header {
//!     zerocopy_accessors! {
//!         record_count: u32,
//!         record_len: u16,
//!     }
//! }
//!
//! // Generates:
//! // pub fn record_count(&self) -> u32 { self.record_count.get() }
//! // pub fn set_record_count(&mut self, val: u32) { ... }
//! // pub fn record_len(&self) -> u16 { self.record_len.get() }
//! // pub fn set_record_len(&mut self, val: u16) { ... }
//! ```

/// Generates getter and setter methods for zerocopy little-endian fields.
#[macro_export]
macro_rules! zerocopy_accessors {
    (@impl $field:ident, u16) => {
        ::paste::paste! {
            #[inline]
            pub fn $field(&self) -> u16 {
                self.$field.get()
            }

            #[inline]
            pub fn [<set_ $field>](&mut self, val: u16) {
                self.$field = ::zerocopy::little_endian::U16::new(val);
            }
        }
    };
    (@impl $field:ident, u32) => {
        ::paste::paste! {
            #[inline]
            pub fn $field(&self) -> u32 {
                self.$field.get()
            }

            #[inline]
            pub fn [<set_ $field>](&mut self, val: u32) {
                self.$field = ::zerocopy::little_endian::U32::new(val);
            }
        }
    };
    ($($field:ident : $ty:tt),* $(,)?) => {
        $(
            $crate::zerocopy_accessors!(@impl $field, $ty);
        )*
    };
}
