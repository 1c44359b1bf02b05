use serde::{Deserialize, Serialize};

/// Declares a closed portal lookup table: a fieldless enum whose variants map
/// to the server's integer code and the label shown on the portal.
macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.label() == label)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_table! {
    /// 教室类型
    ClassroomType {
        Ordinary = 1 => "普通教室",
        LargeMultimedia = 2 => "多媒体大教室",
        SmallMultimedia = 3 => "多媒体小教室",
        Language = 4 => "语音室",
        Unscheduled = 5 => "不排课教室",
        Recording = 6 => "录播教室",
        ComputerLab = 7 => "机房",
        Activity = 8 => "活动教室",
        Sports = 9 => "体育教学场地",
        Smart = 10 => "智慧教室",
        Laboratory = 11 => "实验室",
        Seminar = 12 => "研讨室",
        MultiPurpose = 21 => "多功能",
    }
}

code_table! {
    /// 校区
    Campus {
        Main = 1 => "本部",
        Beidaihe = 2 => "北戴河",
        New = 3 => "新校区",
    }
}

code_table! {
    /// 教学楼
    Building {
        Engineering = 1 => "工学馆",
        Foundation = 2 => "基础楼",
        ComprehensiveLab = 3 => "综合实验楼",
        Geology = 4 => "地质楼",
        Management = 5 => "管理楼",
        UniversityHall = 6 => "大学会馆",
        OldLab = 7 => "旧实验楼",
        Humanities = 8 => "人文楼",
        Technology = 9 => "科技楼",
    }
}

code_table! {
    /// 时间周期类型
    CycleType {
        Day = 1 => "天",
        Week = 2 => "周",
    }
}

code_table! {
    /// 使用时间类型
    RoomApplyTimeType {
        Period = 0 => "小节",
        Time = 1 => "时间",
    }
}

impl Building {
    /// Short ASCII code used in output file names and on the command line.
    pub fn file_code(self) -> &'static str {
        match self {
            Building::Engineering => "gxg",
            Building::Foundation => "jcl",
            Building::ComprehensiveLab => "zhsyl",
            Building::Geology => "dzl",
            Building::Management => "gll",
            Building::UniversityHall => "dxhg",
            Building::OldLab => "jsyl",
            Building::Humanities => "rwl",
            Building::Technology => "kjl",
        }
    }

    pub fn from_file_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.file_code().eq_ignore_ascii_case(code))
    }
}

impl std::str::FromStr for Building {
    type Err = String;

    /// Accepts the file code (`gxg`), the numeric id (`1`) or the label (`工学馆`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Building::from_file_code(s)
            .or_else(|| s.parse::<u8>().ok().and_then(Building::from_code))
            .or_else(|| Building::from_label(s))
            .ok_or_else(|| format!("unknown building: {s}"))
    }
}

impl std::str::FromStr for Campus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<u8>()
            .ok()
            .and_then(Campus::from_code)
            .or_else(|| Campus::from_label(s))
            .ok_or_else(|| format!("unknown campus: {s}"))
    }
}

/// Names of the free classrooms for one query, in server row order.
pub type FreeClassroomResult = Vec<String>;

/// One room as shown by the preview server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomInfo {
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: String,
    pub building: String,
    pub is_free: bool,
}

/// Payload of the preview server's data endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassroomDataResponse {
    pub date: String,
    pub period: u8,
    pub building: String,
    pub classrooms: Vec<ClassroomInfo>,
}
