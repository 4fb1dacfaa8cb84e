#[cfg(test)]
mod ownership_tests {
    use std::ptr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use skshim::{NativeRefCounted, RefCnt, Sp, sp, sp_from_const};

    /// Native-style object that records its destruction.
    struct Picture {
        ref_cnt: RefCnt,
        destroyed: Arc<AtomicUsize>,
    }

    unsafe impl NativeRefCounted for Picture {
        fn ref_cnt(&self) -> &RefCnt {
            &self.ref_cnt
        }
    }

    impl Drop for Picture {
        fn drop(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Stands in for a native factory: hands over one reference.
    fn make_picture(destroyed: &Arc<AtomicUsize>) -> *mut Picture {
        Box::into_raw(Box::new(Picture {
            ref_cnt: RefCnt::new(),
            destroyed: Arc::clone(destroyed),
        }))
    }

    /// Stands in for a native getter returning a borrowed const pointer
    /// together with an owned reference.
    fn make_const_picture(destroyed: &Arc<AtomicUsize>) -> *const Picture {
        make_picture(destroyed)
    }

    #[test]
    fn test_null_through_both_adapters_is_safe_to_drop() {
        let mutable: Sp<Picture> = unsafe { sp(ptr::null_mut()) };
        let constant: Sp<Picture> = unsafe { sp_from_const(ptr::null()) };

        assert!(mutable.is_null());
        assert!(constant.is_null());
        drop(mutable);
        drop(constant);
    }

    #[test]
    fn test_object_outlives_raw_pointer_scope() {
        let destroyed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<Sp<Picture>> = {
            let raw = make_picture(&destroyed);
            let handle = unsafe { sp(raw) };
            (0..4).map(|_| handle.clone()).collect()
        };

        assert_eq!(handles[0].ref_count(), 4);
        assert_eq!(destroyed.load(Ordering::SeqCst), 0);

        let mut handles = handles;
        while let Some(handle) = handles.pop() {
            if handles.is_empty() {
                assert_eq!(destroyed.load(Ordering::SeqCst), 0);
            }
            drop(handle);
        }
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_const_adapter_destroys_exactly_once() {
        let destroyed = Arc::new(AtomicUsize::new(0));

        let first = unsafe { sp_from_const(make_const_picture(&destroyed)) };
        let second = first.clone();
        drop(first);
        assert_eq!(destroyed.load(Ordering::SeqCst), 0);
        drop(second);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handles_move_between_threads() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let handle = unsafe { sp(make_picture(&destroyed)) };

        let worker = {
            let handle = handle.clone();
            std::thread::spawn(move || handle.ref_count() >= 1)
        };
        assert!(worker.join().unwrap());

        assert_eq!(handle.ref_count(), 1);
        drop(handle);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }
}
