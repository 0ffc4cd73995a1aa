pub mod job_scheduler;
