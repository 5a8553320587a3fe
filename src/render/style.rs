//! 元素到样式类的固定映射。

pub const WRAPPER: &str = "prose prose-invert prose-zinc max-w-none";

pub const H1: &str = "text-3xl font-bold mb-4 text-white";
pub const H2: &str = "text-2xl font-semibold mb-3 mt-8 text-white";
pub const H3: &str = "text-xl font-semibold mb-2 mt-6 text-white";
pub const P: &str = "mb-4 text-zinc-300 leading-relaxed";
pub const UL: &str = "list-disc list-inside mb-4 text-zinc-300 space-y-2";
pub const OL: &str = "list-decimal list-inside mb-4 text-zinc-300 space-y-2";
pub const LI: &str = "text-zinc-300";
pub const A: &str = "text-ox-purple hover:text-ox-purple/80 underline transition-colors";
pub const BLOCKQUOTE: &str =
    "border-l-4 border-ox-purple pl-4 py-2 my-4 italic text-zinc-400 bg-[#15161a]";
pub const INLINE_CODE: &str = "bg-[#15161a] text-ox-purple px-1.5 py-0.5 rounded text-sm font-mono";
pub const PRE: &str = "bg-[#15161a] rounded-lg overflow-x-auto my-4";
pub const CODE_BLOCK: &str =
    "block bg-[#15161a] text-zinc-300 p-4 rounded-lg overflow-x-auto my-4 font-mono text-sm";
pub const IMG: &str = "rounded-lg my-4 max-w-full h-auto";
pub const TABLE_WRAPPER: &str = "overflow-x-auto my-4";
pub const TABLE: &str = "min-w-full border border-[#1d1d21]";
pub const TH: &str =
    "border border-[#1d1d21] bg-[#15161a] px-4 py-2 text-left text-white font-semibold";
pub const TD: &str = "border border-[#1d1d21] px-4 py-2 text-zinc-300";
pub const HR: &str = "my-8 border-[#1d1d21]";

/// 链接统一在新窗口打开
pub const LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;
