pub mod proc_info;
pub mod proc_profiler;
