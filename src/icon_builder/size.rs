//! # 目标尺寸模块
//!
//! ## 设计思路
//!
//! `IconSize` 描述一个嵌入尺寸，`TargetSizeSet` 描述一次构建要嵌入的全部尺寸（有序、不可变）。
//! Windows 在不同场景下选用不同尺寸：
//! 16（标题栏/小图标）、32（桌面）、48（资源管理器）、64/128（大图标）、256（超大图标/高 DPI）。
//!
//! ## 实现思路
//!
//! - 构造不做校验，统一由 `validate` 给出 `IconError::Encode`，
//!   与“编码阶段拒绝非法尺寸”的语义保持一致。
//! - 顺序即报告顺序；是否重复由 `validate` 检查。

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::IconError;

/// ICO 目录项用一个字节存宽高，0 表示 256，因此单边上限为 256。
pub const MAX_ICON_EDGE: u32 = 256;

/// 默认嵌入的边长（像素）。
pub const DEFAULT_ICON_EDGES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// 单个嵌入尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconSize {
    width: u32,
    height: u32,
}

impl IconSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 校验尺寸能否写入 ICO 容器：正方形且边长在 `1..=256`。
    pub fn validate(&self) -> Result<(), IconError> {
        if self.width != self.height {
            return Err(IconError::Encode(format!("图标尺寸必须为正方形：{}", self)));
        }
        if self.width == 0 || self.width > MAX_ICON_EDGE {
            return Err(IconError::Encode(format!(
                "图标尺寸超出范围：{}（允许 1~{}）",
                self, MAX_ICON_EDGE
            )));
        }
        Ok(())
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 解析 `"32"` 或 `"32x32"`（也接受 `X` / `×`）。
impl FromStr for IconSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let parse_edge = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("无法解析尺寸：{}", token))
        };

        match token.split_once(['x', 'X', '×']) {
            Some((w, h)) => Ok(Self::new(parse_edge(w)?, parse_edge(h)?)),
            None => Ok(Self::square(parse_edge(token)?)),
        }
    }
}

/// 一次构建要嵌入的有序尺寸集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSizeSet(Vec<IconSize>);

impl Default for TargetSizeSet {
    fn default() -> Self {
        Self::from_edges(&DEFAULT_ICON_EDGES)
    }
}

impl TargetSizeSet {
    pub fn new(sizes: Vec<IconSize>) -> Self {
        Self(sizes)
    }

    pub fn from_edges(edges: &[u32]) -> Self {
        Self(edges.iter().copied().map(IconSize::square).collect())
    }

    pub fn as_slice(&self) -> &[IconSize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconSize> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 校验整个集合：非空、每项合法、无重复。
    pub fn validate(&self) -> Result<(), IconError> {
        if self.0.is_empty() {
            return Err(IconError::Encode("至少需要一个图标尺寸".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.0.len());
        for size in &self.0 {
            size.validate()?;
            if !seen.insert(*size) {
                return Err(IconError::Encode(format!("图标尺寸重复：{}", size)));
            }
        }

        Ok(())
    }

    /// 以 `"16x16, 32x32"` 形式输出，顺序与输入一致。
    pub fn describe(&self) -> String {
        describe_sizes(&self.0)
    }
}

impl FromStr for TargetSizeSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sizes = s
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(IconSize::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(sizes))
    }
}

impl<'a> IntoIterator for &'a TargetSizeSet {
    type Item = &'a IconSize;
    type IntoIter = std::slice::Iter<'a, IconSize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn describe_sizes(sizes: &[IconSize]) -> String {
    sizes
        .iter()
        .map(IconSize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
