pub mod core;
pub mod ingest;
pub mod index;
pub mod query;
pub mod parallel;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                        GRADEX STRUCT ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CORE LAYER ──────────────────────────────┐
│                                                                          │
│  ┌────────────────────────────────────────────────────────────────┐     │
│  │                     struct LearnerRegistry                      │     │
│  │  ┌──────────────────────────────────────────────────────────┐  │     │
│  │  │ config: Config                 // Thresholds + workers   │  │     │
│  │  │ state: RwLock<StoreState>      // Records + index        │  │     │
│  │  │ query_cache: QueryCache        // LRU course-list cache  │  │     │
│  │  │ // Metrics                                               │  │     │
│  │  │ start_time: Instant                                      │  │     │
│  │  │ query_count: AtomicU64                                   │  │     │
│  │  │ sort_count: AtomicU64                                    │  │     │
│  │  └──────────────────────────────────────────────────────────┘  │     │
│  └────────────────────────────────────────────────────────────────┘     │
│                                                                          │
│  ┌──────────────────┐  ┌────────────────────┐  ┌─────────────────────┐   │
│  │ struct Config    │  │ struct             │  │ struct RegistryStats│   │
│  │ • grade_threshold│  │   LearnerRecord    │  │ • total_records     │   │
│  │ • index_workers  │  │ • name: String     │  │ • indexed_courses   │   │
│  │ • cache size     │  │ • id: LearnerId    │  │ • generation        │   │
│  └──────────────────┘  │ • past_grades: Map │  │ • cache_stats       │   │
│                        │ • active_courses   │  └─────────────────────┘   │
│  ┌──────────────────┐  └────────────────────┘                            │
│  │ struct RecordPos │  ┌────────────────────┐  ┌─────────────────────┐   │
│  │ • 0: u32         │  │ enum LearnerId     │  │ enum CourseRef      │   │
│  └──────────────────┘  │ • Numeric(i64)     │  │ • Named(String)     │   │
│                        │ • Code(String)     │  │ • Coded(u32)        │   │
│                        └────────────────────┘  └─────────────────────┘   │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────  INDEX LAYER  ─────────────────────────────┐
│                                                                          │
│  ┌────────────────────────┐      ┌───────────────────────────────────┐   │
│  │ struct HighGradeIndex  │      │ struct PostingList                │   │
│  │ • postings: HashMap    │──────│ • positions: Vec<RecordPos>       │   │
│  │ • record_count         │      │   (sorted ascending, unique)      │   │
│  │ • threshold            │      │ • intersect() gallops             │   │
│  └────────────────────────┘      └───────────────────────────────────┘   │
│                                                                          │
│  ┌───────────────────────────────────┐                                   │
│  │ struct ParallelIndexBuilder       │  rayon chunk scan, fold in       │
│  │ • workers / min_records           │  chunk order == store order      │
│  │ • progress: Arc<AtomicUsize>      │                                   │
│  └───────────────────────────────────┘                                   │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────  QUERY LAYER  ─────────────────────────────┐
│                                                                          │
│  query_high_grades(index, courses) -> Vec<RecordPos>                     │
│    empty list -> empty | absent course -> empty | else fold intersect    │
│                                                                          │
│  ┌────────────────────────┐  ┌──────────────────────┐                    │
│  │ struct QueryCache      │  │ struct QueryKey      │                    │
│  │ • cache: LruCache      │  │ • courses: Vec<Str>  │                    │
│  │ • hit/miss: Atomic     │  └──────────────────────┘                    │
│  └────────────────────────┘                                              │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────  PARALLEL LAYER  ────────────────────────────┐
│                                                                          │
│  parallel_sort_by_name(records)                                          │
│    split_at_mut(mid) -> crossbeam scope: two workers, one half each      │
│    scope exit = join barrier -> final merge on the calling thread        │
│                                                                          │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────  INGEST LAYER  ────────────────────────────┐
│                                                                          │
│  CsvLoader ──rows──> fields (nom cell parsers) ──> LearnerRecord         │
│    malformed rows skip with a warning; only unreadable files error       │
│                                                                          │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── RELATIONSHIPS ─────────────────────────────┐
│                                                                          │
│  LearnerRegistry ──load──> CsvLoader ──parses──> LearnerRecord           │
│        │                                                                 │
│        ├──rebuilds──> ParallelIndexBuilder ──> HighGradeIndex            │
│        │                                                                 │
│        ├──queries──> engine::query_high_grades ──uses──> PostingList     │
│        │                    │                                            │
│        │                    └──cached by──> QueryCache                   │
│        │                                                                 │
│        └──clones──> working copy ──> parallel_sort_by_name               │
│                     (store order never mutated by a sort)                │
│                                                                          │
└──────────────────────────────────────────────────────────────────────────┘
*/
