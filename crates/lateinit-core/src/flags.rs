//! Declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Modifiers the front end attaches to a declaration.
    ///
    /// ```
    /// use lateinit_core::DeclFlags;
    ///
    /// let flags = DeclFlags::DEFERRED_INIT | DeclFlags::MUTABLE;
    /// assert!(flags.is_deferred_init());
    /// assert!(!flags.is_fake_override());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeclFlags: u32 {
        /// Declared without an initializer; assigned before first use.
        const DEFERRED_INIT = 1 << 0;
        /// Reassignable (`var`).
        const MUTABLE = 1 << 1;
        /// Declared with an extension receiver.
        const EXTENSION = 1 << 2;
        /// Synthesized override forwarding to an inherited declaration.
        const FAKE_OVERRIDE = 1 << 3;
        /// Top-level or companion storage rather than an instance member.
        const STATIC = 1 << 4;
    }
}

impl DeclFlags {
    #[inline]
    pub const fn is_deferred_init(self) -> bool {
        self.contains(DeclFlags::DEFERRED_INIT)
    }

    #[inline]
    pub const fn is_mutable(self) -> bool {
        self.contains(DeclFlags::MUTABLE)
    }

    #[inline]
    pub const fn is_extension(self) -> bool {
        self.contains(DeclFlags::EXTENSION)
    }

    #[inline]
    pub const fn is_fake_override(self) -> bool {
        self.contains(DeclFlags::FAKE_OVERRIDE)
    }

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(DeclFlags::STATIC)
    }
}
