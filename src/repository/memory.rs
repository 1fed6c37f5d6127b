use super::{FacultyRepository, StudentRepository};
use crate::error::AppError;
use crate::model::{Faculty, FacultyRecord, Student, StudentRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    faculty_seq: i64,
    student_seq: i64,
    faculties: BTreeMap<i64, Faculty>,
    students: BTreeMap<i64, StudentRecord>,
}

impl Tables {
    fn resolve(&self, id: i64, record: &StudentRecord) -> Student {
        Student {
            id,
            name: record.name.clone(),
            age: record.age,
            faculty: record.faculty_id.and_then(|fid| self.faculties.get(&fid).cloned()),
        }
    }

    fn students_where<P>(&self, predicate: P) -> Vec<Student>
    where
        P: Fn(&StudentRecord) -> bool,
    {
        self.students
            .iter()
            .filter(|(_, r)| predicate(r))
            .map(|(id, r)| self.resolve(*id, r))
            .collect()
    }

    /// Same rule the foreign key enforces in PostgreSQL.
    fn check_reference(&self, record: &StudentRecord) -> Result<(), AppError> {
        match record.faculty_id {
            Some(fid) if !self.faculties.contains_key(&fid) => {
                Err(AppError::Conflict(format!("faculty {} does not exist", fid)))
            }
            _ => Ok(()),
        }
    }

    fn is_referenced(&self, faculty_id: i64) -> bool {
        self.students.values().any(|s| s.faculty_id == Some(faculty_id))
    }
}

/// In-process store. Ids come from per-table sequences starting at 1 and are never reused.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another request panicked mid-write; the maps stay usable.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FacultyRepository for MemoryRepository {
    async fn create(&self, record: FacultyRecord) -> Result<Faculty, AppError> {
        let mut t = self.write();
        t.faculty_seq += 1;
        let faculty = Faculty::from_record(t.faculty_seq, record);
        t.faculties.insert(faculty.id, faculty.clone());
        Ok(faculty)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        Ok(self.read().faculties.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Faculty>, AppError> {
        Ok(self.read().faculties.values().cloned().collect())
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<Faculty>, AppError> {
        let wanted = color.to_lowercase();
        Ok(self
            .read()
            .faculties
            .values()
            .filter(|f| f.color.to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, record: FacultyRecord) -> Result<Option<Faculty>, AppError> {
        let mut t = self.write();
        Ok(t.faculties.get_mut(&id).map(|f| {
            *f = Faculty::from_record(id, record);
            f.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        let mut t = self.write();
        if t.is_referenced(id) {
            return Err(AppError::Conflict(format!("faculty {} is referenced by students", id)));
        }
        Ok(t.faculties.remove(&id))
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut t = self.write();
        if t.students.values().any(|s| s.faculty_id.is_some()) {
            return Err(AppError::Conflict("faculties are referenced by students".into()));
        }
        let removed = t.faculties.len() as u64;
        t.faculties.clear();
        Ok(removed)
    }
}

#[async_trait]
impl StudentRepository for MemoryRepository {
    async fn create(&self, record: StudentRecord) -> Result<Student, AppError> {
        let mut t = self.write();
        t.check_reference(&record)?;
        t.student_seq += 1;
        let id = t.student_seq;
        let student = t.resolve(id, &record);
        t.students.insert(id, record);
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let t = self.read();
        Ok(t.students.get(&id).map(|r| t.resolve(id, r)))
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.read().students_where(|_| true))
    }

    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<Student>, AppError> {
        Ok(self.read().students_where(|r| min <= r.age && r.age <= max))
    }

    async fn find_by_faculty(&self, faculty_id: i64) -> Result<Vec<Student>, AppError> {
        Ok(self.read().students_where(|r| r.faculty_id == Some(faculty_id)))
    }

    async fn update(&self, id: i64, record: StudentRecord) -> Result<Option<Student>, AppError> {
        let mut t = self.write();
        if !t.students.contains_key(&id) {
            return Ok(None);
        }
        t.check_reference(&record)?;
        let student = t.resolve(id, &record);
        t.students.insert(id, record);
        Ok(Some(student))
    }

    async fn delete(&self, id: i64) -> Result<Option<Student>, AppError> {
        let mut t = self.write();
        let removed = t.students.remove(&id);
        Ok(removed.map(|r| t.resolve(id, &r)))
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut t = self.write();
        let removed = t.students.len() as u64;
        t.students.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculty(name: &str, color: &str) -> FacultyRecord {
        FacultyRecord {
            name: name.into(),
            color: color.into(),
        }
    }

    fn student(name: &str, age: i32, faculty_id: Option<i64>) -> StudentRecord {
        StudentRecord {
            name: name.into(),
            age,
            faculty_id,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let repo = MemoryRepository::new();
        let a = FacultyRepository::create(&repo, faculty("Gryffindor", "red")).await.unwrap();
        let b = FacultyRepository::create(&repo, faculty("Slytherin", "green")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        FacultyRepository::delete(&repo, b.id).await.unwrap();
        let c = FacultyRepository::create(&repo, faculty("Hufflepuff", "yellow")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn student_resolves_current_faculty() {
        let repo = MemoryRepository::new();
        let house = FacultyRepository::create(&repo, faculty("Gryffindor", "red")).await.unwrap();
        let harry = StudentRepository::create(&repo, student("Harry Potter", 15, Some(house.id)))
            .await
            .unwrap();
        assert_eq!(harry.faculty.as_ref(), Some(&house));

        let renamed = FacultyRepository::update(&repo, house.id, faculty("Gryffindor", "scarlet"))
            .await
            .unwrap()
            .unwrap();
        let fetched = StudentRepository::find_by_id(&repo, harry.id).await.unwrap().unwrap();
        assert_eq!(fetched.faculty, Some(renamed));
    }

    #[tokio::test]
    async fn age_range_is_inclusive() {
        let repo = MemoryRepository::new();
        for (i, age) in [13, 14, 15, 17, 18].into_iter().enumerate() {
            StudentRepository::create(&repo, student(&format!("s{i}"), age, None)).await.unwrap();
        }
        let ages: Vec<i32> = repo
            .find_by_age_between(14, 17)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.age)
            .collect();
        assert_eq!(ages, vec![14, 15, 17]);
    }

    #[tokio::test]
    async fn unknown_faculty_reference_is_a_conflict() {
        let repo = MemoryRepository::new();
        let err = StudentRepository::create(&repo, student("Ghost", 12, Some(42))).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn referenced_faculty_cannot_be_deleted() {
        let repo = MemoryRepository::new();
        let house = FacultyRepository::create(&repo, faculty("Ravenclaw", "blue")).await.unwrap();
        StudentRepository::create(&repo, student("Luna Lovegood", 14, Some(house.id)))
            .await
            .unwrap();

        assert!(FacultyRepository::delete(&repo, house.id).await.is_err());
        assert!(FacultyRepository::delete_all(&repo).await.is_err());

        assert_eq!(StudentRepository::delete_all(&repo).await.unwrap(), 1);
        assert_eq!(FacultyRepository::delete_all(&repo).await.unwrap(), 1);
        assert!(StudentRepository::find_all(&repo).await.unwrap().is_empty());
        assert!(FacultyRepository::find_all(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_student_is_none() {
        let repo = MemoryRepository::new();
        let updated = StudentRepository::update(&repo, 5, student("Nobody", 11, None)).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn color_lookup_ignores_case() {
        let repo = MemoryRepository::new();
        FacultyRepository::create(&repo, faculty("Gryffindor", "Red")).await.unwrap();
        FacultyRepository::create(&repo, faculty("Slytherin", "green")).await.unwrap();
        let found = repo.find_by_color("RED").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Gryffindor");
    }
}
