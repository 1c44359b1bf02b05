use crate::error::{ErrorKind, Result};
use crate::model::structs::{Building, Campus, ClassroomType, CycleType, RoomApplyTimeType};

/// Largest page the search endpoint will serve.
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const FIRST_PERIOD: u8 = 1;
pub const LAST_PERIOD: u8 = 12;

/// Credentials as posted to `/loginExt.action`
#[derive(Debug, Clone)]
pub struct LoginParams {
    pub username: String,
    pub hashed_password: String,
}

impl LoginParams {
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.hashed_password.clone()),
        ]
    }
}

/// 时间周期: the date range a query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTime {
    /// Usually 1
    pub cycle_count: u32,
    pub cycle_type: CycleType,
    /// yyyy-mm-dd
    pub date_begin: String,
    /// yyyy-mm-dd
    pub date_end: String,
}

/// Parameters of `/classroom/apply/free!search.action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeClassroomQuery {
    pub classroom_type: Option<ClassroomType>,
    pub campus: Option<Campus>,
    pub building: Option<Building>,
    pub seats: Option<u32>,
    pub classroom_name: String,
    pub cycle_time: CycleTime,
    pub room_apply_time_type: RoomApplyTimeType,
    /// 第几节开始
    pub time_begin: u8,
    /// 第几节结束
    pub time_end: u8,
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
}

impl FreeClassroomQuery {
    /// One day, one period, addressed by period slot.
    pub fn single_period(campus: Campus, building: Building, date: &str, period: u8) -> Self {
        Self {
            classroom_type: None,
            campus: Some(campus),
            building: Some(building),
            seats: None,
            classroom_name: String::new(),
            cycle_time: CycleTime {
                cycle_count: 1,
                cycle_type: CycleType::Day,
                date_begin: date.to_string(),
                date_end: date.to_string(),
            },
            room_apply_time_type: RoomApplyTimeType::Period,
            time_begin: period,
            time_end: period,
            page_no: None,
            page_size: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let periods = FIRST_PERIOD..=LAST_PERIOD;
        if !periods.contains(&self.time_begin) || !periods.contains(&self.time_end) {
            return Err(ErrorKind::ValidationError(format!(
                "period range {}-{} outside {FIRST_PERIOD}-{LAST_PERIOD}",
                self.time_begin, self.time_end
            ))
            .into());
        }
        if self.time_begin > self.time_end {
            return Err(ErrorKind::ValidationError(format!(
                "period begin {} after end {}",
                self.time_begin, self.time_end
            ))
            .into());
        }
        if self.page_no == Some(0) {
            return Err(ErrorKind::ValidationError("page number starts at 1".to_string()).into());
        }
        if let Some(size) = self.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(ErrorKind::ValidationError(format!(
                    "page size {size} outside 1-{MAX_PAGE_SIZE}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Form pairs with the field names the portal expects. Absent optional
    /// fields are left out.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = Vec::with_capacity(14);
        if let Some(t) = self.classroom_type {
            form.push(("classroom.type.id", t.code().to_string()));
        }
        if let Some(c) = self.campus {
            form.push(("classroom.campus.id", c.code().to_string()));
        }
        if let Some(b) = self.building {
            form.push(("classroom.building.id", b.code().to_string()));
        }
        if let Some(seats) = self.seats {
            form.push(("seats", seats.to_string()));
        }
        form.push(("classroom.name", self.classroom_name.clone()));
        form.push(("cycleTime.cycleCount", self.cycle_time.cycle_count.to_string()));
        form.push(("cycleTime.cycleType", self.cycle_time.cycle_type.code().to_string()));
        form.push(("cycleTime.dateBegin", self.cycle_time.date_begin.clone()));
        form.push(("cycleTime.dateEnd", self.cycle_time.date_end.clone()));
        form.push(("roomApplyTimeType", self.room_apply_time_type.code().to_string()));
        form.push(("timeBegin", self.time_begin.to_string()));
        form.push(("timeEnd", self.time_end.to_string()));
        if let Some(page_no) = self.page_no {
            form.push(("pageNo", page_no.to_string()));
        }
        if let Some(page_size) = self.page_size {
            form.push(("pageSize", page_size.to_string()));
        }
        form
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(self.to_form())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> FreeClassroomQuery {
        FreeClassroomQuery::single_period(Campus::Main, Building::Engineering, "2025-03-01", 1)
            .with_page_size(500)
    }

    #[test]
    fn form_uses_portal_field_names() {
        let form = query().to_form();
        let keys: Vec<&str> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "classroom.campus.id",
                "classroom.building.id",
                "classroom.name",
                "cycleTime.cycleCount",
                "cycleTime.cycleType",
                "cycleTime.dateBegin",
                "cycleTime.dateEnd",
                "roomApplyTimeType",
                "timeBegin",
                "timeEnd",
                "pageSize",
            ]
        );
        assert!(form.contains(&("timeBegin", "1".to_string())));
        assert!(form.contains(&("roomApplyTimeType", "0".to_string())));
        assert!(form.contains(&("classroom.name", String::new())));
    }

    #[test]
    fn encoded_form_parses_back_to_same_pairs() {
        let mut q = query();
        q.classroom_type = Some(ClassroomType::Smart);
        q.seats = Some(40);
        q.page_no = Some(2);

        let encoded = q.encode().unwrap();
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&encoded).unwrap();
        let expected: Vec<(String, String)> = q
            .to_form()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(decoded, expected);
        assert!(encoded.contains("classroom.type.id=10"));
    }

    #[test]
    fn validate_rejects_out_of_range_input() {
        assert!(query().validate().is_ok());

        let mut q = query();
        q.time_end = 13;
        assert!(matches!(q.validate().unwrap_err().kind(), ErrorKind::ValidationError(_)));

        let mut q = query();
        q.time_begin = 5;
        q.time_end = 3;
        assert!(q.validate().is_err());

        let mut q = query();
        q.page_size = Some(MAX_PAGE_SIZE + 1);
        assert!(q.validate().is_err());

        let mut q = query();
        q.page_no = Some(0);
        assert!(q.validate().is_err());
    }
}
