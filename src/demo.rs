/// The bundled demo dataset: 15 participants, two study groups, four regions.
///
/// `age`, `score`, `hours` and `satisfaction` infer as numeric; `name`,
/// `group` and `region` as categorical.
pub const DEMO_CSV: &str = "\
name,age,group,score,hours,satisfaction,region
Alice,28,A,82,12,4.2,North
Bob,35,B,67,8,3.1,South
Carol,22,A,91,15,4.7,North
David,41,B,58,6,2.8,East
Eve,30,A,88,14,4.5,West
Frank,27,B,72,9,3.4,South
Grace,33,A,95,16,4.9,North
Hank,45,B,54,5,2.5,East
Iris,29,A,85,13,4.3,West
Jack,38,B,63,7,3.0,South
Kim,24,A,90,15,4.6,North
Leo,36,B,60,6,2.9,East
Mia,31,A,87,14,4.4,West
Noah,42,B,55,5,2.6,South
Olga,26,A,93,16,4.8,North
";

/// Column names of [`DEMO_CSV`], in header order.
pub const DEMO_COLUMNS: [&str; 7] = [
    "name",
    "age",
    "group",
    "score",
    "hours",
    "satisfaction",
    "region",
];
