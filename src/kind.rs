use bitflags::bitflags;
use num_enum::TryFromPrimitive;

use crate::index::AttributeIndex;

bitflags! {
    /// The classes of attribute index an attribute kind may be placed on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IndexKinds: u8 {
        /// The function (or call site) as a whole
        const FUNCTION = 1 << 0;
        /// The return value
        const RETURN = 1 << 1;
        /// Any parameter
        const PARAMETER = 1 << 2;
    }
}

impl IndexKinds {
    /// Return and parameter slots
    pub const VALUE: Self = Self::RETURN.union(Self::PARAMETER);

    /// Whether `index` falls in one of the classes of this set
    #[must_use]
    pub fn permits(self, index: AttributeIndex) -> bool {
        self.contains(index.kind())
    }
}

/// Well-known (enum) attribute kinds.
///
/// Discriminants are LLVM's stable attribute ids as used in the
/// `PARAMATTR_GROUP` bitcode block, so they round-trip through native stores.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
#[non_exhaustive]
pub enum AttributeKind {
    // = 0 is unused
    Alignment = 1,
    AlwaysInline = 2,
    ByVal = 3,
    InlineHint = 4,
    InReg = 5,
    MinSize = 6,
    Naked = 7,
    Nest = 8,
    NoAlias = 9,
    NoBuiltin = 10,
    NoCapture = 11,
    NoDuplicate = 12,
    NoImplicitFloat = 13,
    NoInline = 14,
    NonLazyBind = 15,
    NoRedZone = 16,
    NoReturn = 17,
    NoUnwind = 18,
    OptimizeForSize = 19,
    ReadNone = 20,
    ReadOnly = 21,
    Returned = 22,
    ReturnsTwice = 23,
    SExt = 24,
    StackAlignment = 25,
    StackProtect = 26,
    StackProtectReq = 27,
    StackProtectStrong = 28,
    StructRet = 29,
    SanitizeAddress = 30,
    SanitizeThread = 31,
    SanitizeMemory = 32,
    UwTable = 33,
    ZExt = 34,
    Builtin = 35,
    Cold = 36,
    OptimizeNone = 37,
    InAlloca = 38,
    NonNull = 39,
    JumpTable = 40,
    Dereferenceable = 41,
    DereferenceableOrNull = 42,
    Convergent = 43,
    SafeStack = 44,
    ArgMemOnly = 45,
    SwiftSelf = 46,
    SwiftError = 47,
    NoRecurse = 48,
    InaccessibleMemOnly = 49,
    InaccessibleMemOrArgMemOnly = 50,
    AllocSize = 51,
    WriteOnly = 52,
    Speculatable = 53,
    StrictFp = 54,
    SanitizeHwAddress = 55,
    NoCfCheck = 56,
    OptForFuzzing = 57,
    ShadowCallStack = 58,
    SpeculativeLoadHardening = 59,
    ImmArg = 60,
    WillReturn = 61,
    NoFree = 62,
    NoSync = 63,
    SanitizeMemTag = 64,
    Preallocated = 65,
    NoMerge = 66,
    NullPointerIsValid = 67,
    NoUndef = 68,
    ByRef = 69,
    MustProgress = 70,
    NoCallback = 71,
    Hot = 72,
    NoProfile = 73,
}

impl AttributeKind {
    const LAST: u32 = Self::NoProfile as u32;

    /// Raw LLVM attribute id
    #[must_use]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Iterate over every known kind in id order
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::LAST).filter_map(|id| Self::try_from(id).ok())
    }

    /// Whether this kind carries an unsigned integer payload
    #[must_use]
    pub fn requires_int_value(self) -> bool {
        matches!(
            self,
            Self::Alignment
                | Self::StackAlignment
                | Self::Dereferenceable
                | Self::DereferenceableOrNull
                | Self::AllocSize
        )
    }

    /// The classes of index this kind is legal on
    #[must_use]
    pub fn allowed_indices(self) -> IndexKinds {
        use AttributeKind::*;

        match self {
            Alignment | InReg | NoAlias | SExt | ZExt | NonNull | Dereferenceable
            | DereferenceableOrNull | NoUndef => IndexKinds::VALUE,

            ByVal | Nest | NoCapture | Returned | StructRet | InAlloca | SwiftSelf
            | SwiftError | ImmArg | Preallocated | ByRef => IndexKinds::PARAMETER,

            ReadNone | ReadOnly | WriteOnly | NoFree => {
                IndexKinds::FUNCTION | IndexKinds::PARAMETER
            }

            AlwaysInline | InlineHint | MinSize | Naked | NoBuiltin | NoDuplicate
            | NoImplicitFloat | NoInline | NonLazyBind | NoRedZone | NoReturn | NoUnwind
            | OptimizeForSize | ReturnsTwice | StackAlignment | StackProtect
            | StackProtectReq | StackProtectStrong | SanitizeAddress | SanitizeThread
            | SanitizeMemory | UwTable | Builtin | Cold | OptimizeNone | JumpTable
            | Convergent | SafeStack | ArgMemOnly | NoRecurse | InaccessibleMemOnly
            | InaccessibleMemOrArgMemOnly | AllocSize | Speculatable | StrictFp
            | SanitizeHwAddress | NoCfCheck | OptForFuzzing | ShadowCallStack
            | SpeculativeLoadHardening | WillReturn | NoSync | SanitizeMemTag | NoMerge
            | NullPointerIsValid | MustProgress | NoCallback | Hot | NoProfile => {
                IndexKinds::FUNCTION
            }
        }
    }

    /// Spelling of this kind in textual LLVM IR
    #[must_use]
    pub fn name(self) -> &'static str {
        use AttributeKind::*;

        match self {
            Alignment => "align",
            AlwaysInline => "alwaysinline",
            ByVal => "byval",
            InlineHint => "inlinehint",
            InReg => "inreg",
            MinSize => "minsize",
            Naked => "naked",
            Nest => "nest",
            NoAlias => "noalias",
            NoBuiltin => "nobuiltin",
            NoCapture => "nocapture",
            NoDuplicate => "noduplicate",
            NoImplicitFloat => "noimplicitfloat",
            NoInline => "noinline",
            NonLazyBind => "nonlazybind",
            NoRedZone => "noredzone",
            NoReturn => "noreturn",
            NoUnwind => "nounwind",
            OptimizeForSize => "optsize",
            ReadNone => "readnone",
            ReadOnly => "readonly",
            Returned => "returned",
            ReturnsTwice => "returns_twice",
            SExt => "signext",
            StackAlignment => "alignstack",
            StackProtect => "ssp",
            StackProtectReq => "sspreq",
            StackProtectStrong => "sspstrong",
            StructRet => "sret",
            SanitizeAddress => "sanitize_address",
            SanitizeThread => "sanitize_thread",
            SanitizeMemory => "sanitize_memory",
            UwTable => "uwtable",
            ZExt => "zeroext",
            Builtin => "builtin",
            Cold => "cold",
            OptimizeNone => "optnone",
            InAlloca => "inalloca",
            NonNull => "nonnull",
            JumpTable => "jumptable",
            Dereferenceable => "dereferenceable",
            DereferenceableOrNull => "dereferenceable_or_null",
            Convergent => "convergent",
            SafeStack => "safestack",
            ArgMemOnly => "argmemonly",
            SwiftSelf => "swiftself",
            SwiftError => "swifterror",
            NoRecurse => "norecurse",
            InaccessibleMemOnly => "inaccessiblememonly",
            InaccessibleMemOrArgMemOnly => "inaccessiblemem_or_argmemonly",
            AllocSize => "allocsize",
            WriteOnly => "writeonly",
            Speculatable => "speculatable",
            StrictFp => "strictfp",
            SanitizeHwAddress => "sanitize_hwaddress",
            NoCfCheck => "nocf_check",
            OptForFuzzing => "optforfuzzing",
            ShadowCallStack => "shadowcallstack",
            SpeculativeLoadHardening => "speculative_load_hardening",
            ImmArg => "immarg",
            WillReturn => "willreturn",
            NoFree => "nofree",
            NoSync => "nosync",
            SanitizeMemTag => "sanitize_memtag",
            Preallocated => "preallocated",
            NoMerge => "nomerge",
            NullPointerIsValid => "null_pointer_is_valid",
            NoUndef => "noundef",
            ByRef => "byref",
            MustProgress => "mustprogress",
            NoCallback => "nocallback",
            Hot => "hot",
            NoProfile => "noprofile",
        }
    }

    /// Look up a kind by its textual IR spelling
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
