//! 符号表：有序的游标注册表 + 数值变量表。
//!
//! 名字在词法分析阶段被"声明"（只知道它是哪一类），
//! 在求值阶段才真正拥有值：数值变量得到赋值，游标得到完整的状态。

use std::collections::HashMap;

/// 一个名字被声明成的类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Cursor,
    Number,
}

impl SymbolKind {
    pub fn describe(self) -> &'static str {
        match self {
            SymbolKind::Cursor => "cursor",
            SymbolKind::Number => "numeric variable",
        }
    }
}

/// 游标的描边颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorColor {
    /// `with (r, g, b, a, thickness, visible)`
    Rgba([i64; 4]),
    /// `with (r1, g1, b1, r2, g2, b2, thickness, visible)`：描边色 + 第二颜色
    TwoTone { stroke: [i64; 3], secondary: [i64; 3] },
}

impl CursorColor {
    /// 生成 `SDL_Color` 时使用的四个通道。
    pub fn sdl_channels(&self) -> [i64; 4] {
        match *self {
            CursorColor::Rgba(rgba) => rgba,
            CursorColor::TwoTone { stroke: [r, g, b], .. } => [r, g, b, 255],
        }
    }
}

/// 一个已创建的游标，状态变化和目标运行时保持一致。
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub name: String,
    pub x: i64,
    pub y: i64,
    /// 朝向，单位为度，范围 `[0, 360)`。
    pub angle: i64,
    pub color: CursorColor,
    pub thickness: i64,
    pub visible: i64,
}

impl Cursor {
    pub fn new(name: impl Into<String>, x: i64, y: i64, color: CursorColor, thickness: i64, visible: i64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            angle: 0,
            color,
            thickness,
            visible,
        }
    }

    /// 沿当前朝向前进 `distance`，结果按 C 的 `int` 转换截断。
    pub fn advance(&mut self, distance: i64) {
        let radians = (self.angle as f64).to_radians();
        self.x = (self.x as f64 + distance as f64 * radians.cos()) as i64;
        self.y = (self.y as f64 + distance as f64 * radians.sin()) as i64;
    }

    pub fn rotate(&mut self, degrees: i64) {
        // angle 始终在 [0, 360)，先取模再相加不会溢出
        self.angle = (self.angle + degrees.rem_euclid(360)) % 360;
    }

    pub fn is_visible(&self) -> bool {
        self.visible != 0
    }
}

/// 数值变量：`value` 为 `None` 表示只被声明、尚未赋值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericVariable {
    pub name: String,
    pub value: Option<i64>,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    /// 游标名，按首次声明的顺序。
    cursor_names: Vec<String>,
    cursors: HashMap<String, Cursor>,
    /// 数值变量，按首次声明的顺序。
    numbers: Vec<NumericVariable>,
    number_index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明一个游标名。已经声明过（无论哪一类）时返回 `false`。
    pub fn declare_cursor(&mut self, name: &str) -> bool {
        if self.kind_of(name).is_some() {
            return false;
        }
        self.cursor_names.push(name.to_string());
        true
    }

    /// 声明一个数值变量。已经声明过（无论哪一类）时返回 `false`。
    pub fn declare_number(&mut self, name: &str) -> bool {
        if self.kind_of(name).is_some() {
            return false;
        }
        self.number_index.insert(name.to_string(), self.numbers.len());
        self.numbers.push(NumericVariable {
            name: name.to_string(),
            value: None,
        });
        true
    }

    /// 查询名字的类别。游标优先，与词法分析器的判定顺序一致。
    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        if self.is_cursor(name) {
            Some(SymbolKind::Cursor)
        } else if self.is_number(name) {
            Some(SymbolKind::Number)
        } else {
            None
        }
    }

    pub fn is_cursor(&self, name: &str) -> bool {
        self.cursor_names.iter().any(|n| n == name)
    }

    pub fn is_number(&self, name: &str) -> bool {
        self.number_index.contains_key(name)
    }

    /// 数值变量当前的值；未声明或未赋值时为 `None`。
    pub fn value(&self, name: &str) -> Option<i64> {
        self.number_index
            .get(name)
            .and_then(|&idx| self.numbers[idx].value)
    }

    /// 给数值变量赋值，必要时顺带声明它。
    pub fn assign(&mut self, name: &str, value: i64) {
        if !self.is_number(name) {
            self.number_index.insert(name.to_string(), self.numbers.len());
            self.numbers.push(NumericVariable {
                name: name.to_string(),
                value: None,
            });
        }
        if let Some(&idx) = self.number_index.get(name) {
            self.numbers[idx].value = Some(value);
        }
    }

    /// 登记一个新创建的游标。同名游标已经创建过时返回 `false`，原状态保持不变。
    pub fn create_cursor(&mut self, cursor: Cursor) -> bool {
        if self.cursors.contains_key(&cursor.name) {
            return false;
        }
        if !self.is_cursor(&cursor.name) {
            self.cursor_names.push(cursor.name.clone());
        }
        self.cursors.insert(cursor.name.clone(), cursor);
        true
    }

    pub fn cursor(&self, name: &str) -> Option<&Cursor> {
        self.cursors.get(name)
    }

    pub fn cursor_mut(&mut self, name: &str) -> Option<&mut Cursor> {
        self.cursors.get_mut(name)
    }

    /// 所有已创建的游标，按声明顺序。
    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.cursor_names.iter().filter_map(|name| self.cursors.get(name))
    }

    pub fn cursor_names(&self) -> &[String] {
        &self.cursor_names
    }

    /// 所有数值变量，按声明顺序。
    pub fn numbers(&self) -> impl Iterator<Item = &NumericVariable> {
        self.numbers.iter()
    }

    /// 运行结束时的变量清单：先是 `name = value`，再是游标名，每行一个。
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for var in &self.numbers {
            match var.value {
                Some(value) => out.push_str(&format!("{} = {value}\n", var.name)),
                None => out.push_str(&format!("{} = None\n", var.name)),
            }
        }
        for name in &self.cursor_names {
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_declare_each_name_once() {
        let mut table = SymbolTable::new();
        assert!(table.declare_cursor("a"));
        assert!(!table.declare_cursor("a"));
        assert!(!table.declare_number("a"), "a cursor name cannot become a number");
        assert!(table.declare_number("n"));
        assert_eq!(table.kind_of("a"), Some(SymbolKind::Cursor));
        assert_eq!(table.kind_of("n"), Some(SymbolKind::Number));
        assert_eq!(table.kind_of("zz"), None);
    }

    #[test]
    fn test_declared_number_has_no_value_until_assigned() {
        let mut table = SymbolTable::new();
        table.declare_number("x");
        assert_eq!(table.value("x"), None);
        table.assign("x", 7);
        table.assign("x", 9);
        assert_eq!(table.value("x"), Some(9));
        assert_eq!(table.numbers().count(), 1);
    }

    #[test]
    fn test_cursor_order_follows_declaration() {
        let mut table = SymbolTable::new();
        table.declare_cursor("b");
        table.declare_cursor("a");
        let color = CursorColor::Rgba([1, 2, 3, 4]);
        assert!(table.create_cursor(Cursor::new("a", 0, 0, color, 1, 1)));
        assert!(table.create_cursor(Cursor::new("b", 0, 0, color, 1, 1)));
        assert!(!table.create_cursor(Cursor::new("b", 5, 5, color, 1, 1)));

        let names: Vec<_> = table.cursors().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(table.cursor("b").map(|c| c.x), Some(0));
    }

    #[test]
    fn test_cursor_motion_matches_runtime() {
        let mut cursor = Cursor::new("c", 10, 20, CursorColor::Rgba([0, 0, 0, 255]), 1, 1);
        cursor.advance(5);
        assert_eq!((cursor.x, cursor.y), (15, 20));

        cursor.rotate(90);
        cursor.advance(10);
        assert_eq!((cursor.x, cursor.y), (15, 30));

        cursor.rotate(-180);
        assert_eq!(cursor.angle, 270);
        cursor.rotate(450);
        assert_eq!(cursor.angle, 0);
    }

    #[test]
    fn test_rotate_by_extreme_angles_stays_in_range() {
        let mut cursor = Cursor::new("c", 0, 0, CursorColor::Rgba([0, 0, 0, 255]), 1, 1);
        cursor.rotate(1);
        cursor.rotate(i64::MAX);
        assert_eq!(cursor.angle, 8);
        cursor.rotate(i64::MIN);
        assert_eq!(cursor.angle, 0);
    }

    #[test]
    fn test_two_tone_color_uses_stroke_triple() {
        let color = CursorColor::TwoTone {
            stroke: [255, 0, 0],
            secondary: [0, 255, 0],
        };
        assert_eq!(color.sdl_channels(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_dump_lists_numbers_then_cursors() {
        let mut table = SymbolTable::new();
        table.assign("x", 3);
        table.declare_number("y");
        table.declare_cursor("c");
        assert_eq!(table.dump(), "x = 3\ny = None\nc\n");
    }
}
